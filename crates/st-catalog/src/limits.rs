//! Optional per-segment speed limits sidecar.
//!
//! ```json
//! { "E18|Sandvika - Lysaker": { "maxAvgKmH": 80, "recommendedAvgKmH": 70 } }
//! ```
//!
//! Presentation-only: the tracking state machine never reads it.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CatalogResult, Segment};

/// Limits configured for one segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentLimits {
    #[serde(rename = "maxAvgKmH", default, skip_serializing_if = "Option::is_none")]
    pub max_avg_kmh: Option<f64>,
    #[serde(rename = "recommendedAvgKmH", default, skip_serializing_if = "Option::is_none")]
    pub recommended_avg_kmh: Option<f64>,
}

/// `"{road}|{name}"` → [`SegmentLimits`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitsTable(HashMap<String, SegmentLimits>);

impl LimitsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the sidecar at `path`; a missing file is an empty table.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        if !path.exists() {
            log::debug!("no limits sidecar at {}", path.display());
            return Ok(Self::new());
        }
        Self::read(std::fs::File::open(path)?)
    }

    pub fn read<R: Read>(reader: R) -> CatalogResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn insert(&mut self, segment: &Segment, limits: SegmentLimits) {
        self.0.insert(segment.cache_key(), limits);
    }

    pub fn get(&self, segment: &Segment) -> Option<&SegmentLimits> {
        self.0.get(&segment.cache_key())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when `speed_kmh` is strictly above the segment's configured
    /// maximum average.  Segments without a maximum never warn.
    pub fn exceeds_max(&self, segment: &Segment, speed_kmh: f64) -> bool {
        self.get(segment)
            .and_then(|l| l.max_avg_kmh)
            .is_some_and(|max| speed_kmh > max)
    }
}
