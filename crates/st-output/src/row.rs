//! Plain data row types written by run writers.

use st_engine::{Phase, TrackingEngine};

/// Name recorded for a run timed between the legacy checkpoints.
pub const CHECKPOINT_RUN_NAME: &str = "checkpoint";

/// One finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Empty for a checkpoint run.
    pub road:        String,
    pub name:        String,
    pub start_ms:    u64,
    pub end_ms:      u64,
    /// Straight-line start → finish distance the average is based on.
    pub distance_m:  f64,
    /// `None` when the elapsed time was not positive.
    pub average_kmh: Option<f64>,
}

impl RunRecord {
    /// Describe the engine's finished run, or `None` if it has not finished.
    pub fn from_engine(engine: &TrackingEngine) -> Option<Self> {
        if engine.phase() != Phase::Finished {
            return None;
        }
        let session = engine.session();
        let (start, end) = (session.start_time?, session.end_time?);
        let distance_m = engine.effective_start()?.distance_m(engine.effective_finish()?);
        let (road, name) = match engine.active_segment() {
            Some(s) => (s.road.clone(), s.name.clone()),
            None => (String::new(), CHECKPOINT_RUN_NAME.to_string()),
        };
        Some(Self {
            road,
            name,
            start_ms: start.as_millis(),
            end_ms: end.as_millis(),
            distance_m,
            average_kmh: engine.average_kmh(),
        })
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.end_ms as i64 - self.start_ms as i64
    }
}
