//! R-tree over segment start points.
//!
//! # Query model
//!
//! Entries are stored as `[lat, lon]` in degree space.  A query first bounds
//! how far poleward any point within the largest geofence radius can lie,
//! then converts that radius into a degree radius using the longitude scale
//! at the poleward edge of the band (the widest it gets), pads it, and pulls
//! every start point inside that circle.  The candidates are then re-checked
//! with the exact haversine test, so the index only ever prunes.
//!
//! Queries whose latitude band reaches a pole, or whose search circle would
//! cross the antimeridian, report `None` so the caller falls back to the
//! linear scan.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use st_core::{is_near, Coordinate};

use crate::{Segment, SegmentId};

/// Metres per degree of latitude (and of longitude at the equator).
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Slack applied to the degree radius so projection error never drops a
/// true match.
const RADIUS_PADDING: f64 = 1.5;

/// Below this `cos(lat)` the degree-space projection is too distorted.
const MIN_COS_LAT: f64 = 0.05;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct StartEntry {
    point: [f64; 2], // [lat, lon]
    id:    SegmentId,
}

impl RTreeObject for StartEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StartEntry {
    /// Squared Euclidean distance in degree space.  Only used for candidate
    /// pruning; the final decision is haversine.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── StartIndex ────────────────────────────────────────────────────────────────

/// Spatial index of segment start points, built once per catalog.
pub struct StartIndex {
    tree: RTree<StartEntry>,
}

impl StartIndex {
    /// Bulk-load the start points of `segments`, ids following slice order.
    pub fn build(segments: &[Segment]) -> Self {
        let entries: Vec<StartEntry> = segments
            .iter()
            .enumerate()
            .map(|(i, s)| StartEntry {
                point: [s.start.lat, s.start.lon],
                id:    SegmentId(i as u32),
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// First segment (lowest id) whose start geofence contains `position`.
    ///
    /// `max_radius_m` must be at least the largest effective radius in the
    /// catalog.  Returns `None` when the query cannot be answered from the
    /// index (see module docs); `Some(None)` means "answered, no match".
    pub fn first_match(
        &self,
        segments:         &[Segment],
        position:         Coordinate,
        default_radius_m: f64,
        max_radius_m:     f64,
    ) -> Option<Option<SegmentId>> {
        let lat_reach = max_radius_m / METRES_PER_DEGREE * RADIUS_PADDING;
        let edge_lat = position.lat.abs() + lat_reach;
        if edge_lat >= 90.0 {
            return None;
        }
        let cos_edge = edge_lat.to_radians().cos();
        if cos_edge < MIN_COS_LAT {
            return None;
        }
        let radius_deg = max_radius_m / (METRES_PER_DEGREE * cos_edge) * RADIUS_PADDING;
        if position.lon.abs() + radius_deg > 180.0 {
            return None;
        }

        let found = self
            .tree
            .locate_within_distance([position.lat, position.lon], radius_deg * radius_deg)
            .filter(|e| {
                let s = &segments[e.id.index()];
                is_near(s.start, Some(position), s.radius_or(default_radius_m))
            })
            .map(|e| e.id)
            .min();
        Some(found)
    }
}
