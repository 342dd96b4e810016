//! Update cadence: how often a subscription reports.

use serde::{Deserialize, Serialize};

use st_core::PositionUpdate;

/// Minimum spacing between reported fixes.  A fix is reported when either
/// threshold has been reached since the last reported one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchOptions {
    pub min_interval_ms: u64,
    pub min_distance_m:  f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            min_interval_ms: 1_000,
            min_distance_m:  5.0,
        }
    }
}

/// Stateful thinning of a raw fix stream according to [`WatchOptions`].
#[derive(Clone, Debug)]
pub struct WatchFilter {
    options: WatchOptions,
    last:    Option<PositionUpdate>,
}

impl WatchFilter {
    pub fn new(options: WatchOptions) -> Self {
        Self { options, last: None }
    }

    /// `true` if `update` should be delivered.  The first fix always is.
    pub fn accept(&mut self, update: &PositionUpdate) -> bool {
        let pass = match &self.last {
            None => true,
            Some(prev) => {
                let interval = update.timestamp.millis_since(prev.timestamp);
                let moved = prev.position.distance_m(update.position);
                interval >= self.options.min_interval_ms as i64 || moved >= self.options.min_distance_m
            }
        };
        if pass {
            self.last = Some(*update);
        }
        pass
    }
}
