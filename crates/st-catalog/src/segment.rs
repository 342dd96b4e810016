//! The `Segment` record and its identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use st_core::{Coordinate, DEFAULT_RADIUS_M};

// ── SegmentId ─────────────────────────────────────────────────────────────────

/// Position of a segment inside its [`SegmentCatalog`](crate::SegmentCatalog).
///
/// Lower ids come first in catalog order, so `min()` over candidate ids
/// yields the first-defined match.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SegmentId(pub u32);

impl SegmentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.0)
    }
}

// ── SegmentKey ────────────────────────────────────────────────────────────────

/// The identity of a segment: its `(road, name)` pair.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SegmentKey {
    pub road: String,
    pub name: String,
}

impl SegmentKey {
    pub fn new(road: impl Into<String>, name: impl Into<String>) -> Self {
        Self { road: road.into(), name: name.into() }
    }

    /// `"{road}|{name}"`: the key used by the path cache and the limits
    /// sidecar.
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.road, self.name)
    }

    /// `"{road}:{name}"`: the row id the remote segment store uses.
    pub fn storage_id(&self) -> String {
        format!("{}:{}", self.road, self.name)
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.road, self.name)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A trackable road stretch with start and finish geofences.
///
/// `path` is display-only.  Distances and averages always use the straight
/// line from `start`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub road: String,
    pub name: String,
    pub start: Coordinate,
    pub finish: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Coordinate>>,
}

impl Segment {
    pub fn new(
        road:   impl Into<String>,
        name:   impl Into<String>,
        start:  Coordinate,
        finish: Coordinate,
    ) -> Self {
        Self {
            road: road.into(),
            name: name.into(),
            start,
            finish,
            radius_meters: None,
            path: None,
        }
    }

    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.radius_meters = Some(radius_m);
        self
    }

    pub fn with_path(mut self, path: Vec<Coordinate>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.road.clone(), self.name.clone())
    }

    #[inline]
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.road, self.name)
    }

    /// Configured radius, or `default_m` when the segment has none.
    #[inline]
    pub fn radius_or(&self, default_m: f64) -> f64 {
        self.radius_meters.unwrap_or(default_m)
    }

    /// Configured radius, or [`DEFAULT_RADIUS_M`].
    #[inline]
    pub fn effective_radius_m(&self) -> f64 {
        self.radius_or(DEFAULT_RADIUS_M)
    }

    /// Straight-line start → finish distance in metres.
    #[inline]
    pub fn length_m(&self) -> f64 {
        self.start.distance_m(self.finish)
    }

    /// Polyline to draw: the detailed path when it has at least two points,
    /// otherwise the straight start → finish line.
    pub fn display_path(&self) -> Vec<Coordinate> {
        match &self.path {
            Some(p) if p.len() >= 2 => p.clone(),
            _ => vec![self.start, self.finish],
        }
    }

    /// Where to place the start and finish markers: the path's first and
    /// last points when a path exists, so markers sit on the drawn road.
    pub fn marker_endpoints(&self) -> (Coordinate, Coordinate) {
        match self.path.as_deref() {
            Some([first, .., last]) => (*first, *last),
            Some([only]) => (*only, *only),
            _ => (self.start, self.finish),
        }
    }
}
