//! The validated, ordered segment catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use st_core::{is_near, Coordinate};

use crate::{CatalogError, CatalogResult, Segment, SegmentId, SegmentKey, StartIndex};

/// How [`SegmentCatalog::first_start_match`] looks for a start geofence.
///
/// Both strategies return the same answer: the first segment in catalog
/// order whose start zone contains the position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStrategy {
    /// Walk every segment in definition order.  Right for the few dozen
    /// segments a regional catalog holds.
    #[default]
    Linear,
    /// Prefilter candidates through the R-tree, then pick the lowest id.
    Indexed,
}

/// An ordered list of segments with unique `(road, name)` keys.
///
/// Immutable once handed to the engine; display paths are merged in
/// beforehand via [`PathCache::merge_into`](crate::PathCache::merge_into).
pub struct SegmentCatalog {
    segments:     Vec<Segment>,
    index:        StartIndex,
    /// Largest explicitly configured radius, used to size index queries.
    max_radius_m: f64,
}

impl SegmentCatalog {
    /// Validate `segments` and build the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateKey`] if two segments share `(road, name)`.
    /// - [`CatalogError::InvalidSegment`] for empty names, out-of-range
    ///   coordinates, or a non-positive / non-finite radius.
    pub fn new(segments: Vec<Segment>) -> CatalogResult<Self> {
        let mut seen: HashSet<SegmentKey> = HashSet::with_capacity(segments.len());
        for s in &segments {
            validate_segment(s)?;
            if !seen.insert(s.key()) {
                return Err(CatalogError::DuplicateKey {
                    road: s.road.clone(),
                    name: s.name.clone(),
                });
            }
        }

        let max_radius_m = segments
            .iter()
            .filter_map(|s| s.radius_meters)
            .fold(0.0_f64, f64::max);
        let index = StartIndex::build(&segments);

        Ok(Self { segments, index, max_radius_m })
    }

    /// A catalog with no segments (legacy checkpoint mode only).
    pub fn empty() -> Self {
        Self {
            segments:     Vec::new(),
            index:        StartIndex::build(&[]),
            max_radius_m: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.index())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// `(SegmentId, &Segment)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentId(i as u32), s))
    }

    pub fn find(&self, road: &str, name: &str) -> Option<SegmentId> {
        self.iter()
            .find(|(_, s)| s.road == road && s.name == name)
            .map(|(id, _)| id)
    }

    /// First segment, in catalog order, whose start geofence contains
    /// `position`.  Segments without a radius use `default_radius_m`.
    pub fn first_start_match(
        &self,
        position:         Coordinate,
        default_radius_m: f64,
        strategy:         ScanStrategy,
    ) -> Option<SegmentId> {
        if strategy == ScanStrategy::Indexed {
            let max_radius = self.max_radius_m.max(default_radius_m);
            if let Some(answer) =
                self.index
                    .first_match(&self.segments, position, default_radius_m, max_radius)
            {
                return answer;
            }
        }
        self.linear_start_match(position, default_radius_m)
    }

    fn linear_start_match(&self, position: Coordinate, default_radius_m: f64) -> Option<SegmentId> {
        self.iter()
            .find(|(_, s)| is_near(s.start, Some(position), s.radius_or(default_radius_m)))
            .map(|(id, _)| id)
    }

    /// Mutable access for path merging before the catalog is shared.
    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }
}

fn validate_segment(s: &Segment) -> CatalogResult<()> {
    let invalid = |reason: String| CatalogError::InvalidSegment { key: s.cache_key(), reason };

    if s.road.trim().is_empty() || s.name.trim().is_empty() {
        return Err(invalid("road and name must be non-empty".into()));
    }
    s.start.validate().map_err(|e| invalid(format!("start: {e}")))?;
    s.finish.validate().map_err(|e| invalid(format!("finish: {e}")))?;
    if let Some(r) = s.radius_meters {
        if !r.is_finite() || r <= 0.0 {
            return Err(invalid(format!("radius {r} must be a positive number of metres")));
        }
    }
    Ok(())
}
