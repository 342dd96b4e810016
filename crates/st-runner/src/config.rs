//! Tracker configuration.
//!
//! # JSON format
//!
//! Every field is optional:
//!
//! ```json
//! {
//!   "default_radius_m": 30,
//!   "watch": { "min_interval_ms": 1000, "min_distance_m": 5 },
//!   "stop_on_finish": false,
//!   "scan": "linear"
//! }
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use st_catalog::ScanStrategy;
use st_core::DEFAULT_RADIUS_M;
use st_engine::EngineConfig;
use st_source::WatchOptions;

use crate::RunnerResult;

/// Knobs for one tracking run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Geofence radius for segments without their own and for checkpoints.
    pub default_radius_m: f64,

    /// Subscription cadence.
    pub watch: WatchOptions,

    /// Release the subscription once a run finishes.  The current speed is
    /// frozen from then on.
    pub stop_on_finish: bool,

    pub scan: ScanStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_radius_m: DEFAULT_RADIUS_M,
            watch:            WatchOptions::default(),
            stop_on_finish:   false,
            scan:             ScanStrategy::Linear,
        }
    }
}

impl TrackerConfig {
    /// Load from a JSON file.  A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> RunnerResult<Self> {
        if !path.exists() {
            log::debug!("{} not found; using default tracker config", path.display());
            return Ok(Self::default());
        }
        let file = std::fs::File::open(path)?;
        Self::read(file)
    }

    pub fn read<R: Read>(reader: R) -> RunnerResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_radius_m: self.default_radius_m,
            scan:             self.scan,
        }
    }
}
