//! Controller observer trait for logging and data collection.

use log::{info, warn};

use st_catalog::LimitsTable;
use st_core::PositionUpdate;
use st_engine::{TrackingEngine, Transition};

/// Callbacks invoked by [`TrackingController`](crate::TrackingController)
/// as updates flow through the engine.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The engine is passed read-only; it has
/// already applied the update when a hook runs.
pub trait TrackingObserver {
    /// The permission request resolved.
    fn on_permission(&mut self, _granted: bool) {}

    /// One update was processed.
    fn on_update(&mut self, _update: &PositionUpdate, _engine: &TrackingEngine) {}

    /// The update just processed fired a phase change.
    fn on_transition(&mut self, _transition: &Transition, _engine: &TrackingEngine) {}

    /// The source closed the stream (or it was stopped on finish).
    fn on_stream_end(&mut self, _engine: &TrackingEngine) {}
}

/// A [`TrackingObserver`] that does nothing.
pub struct NoopObserver;

impl TrackingObserver for NoopObserver {}

impl<O: TrackingObserver + ?Sized> TrackingObserver for &mut O {
    fn on_permission(&mut self, granted: bool) {
        (**self).on_permission(granted);
    }

    fn on_update(&mut self, update: &PositionUpdate, engine: &TrackingEngine) {
        (**self).on_update(update, engine);
    }

    fn on_transition(&mut self, transition: &Transition, engine: &TrackingEngine) {
        (**self).on_transition(transition, engine);
    }

    fn on_stream_end(&mut self, engine: &TrackingEngine) {
        (**self).on_stream_end(engine);
    }
}

/// Fans every hook out to two observers, `A` first.
pub struct Both<A, B>(pub A, pub B);

impl<A: TrackingObserver, B: TrackingObserver> TrackingObserver for Both<A, B> {
    fn on_permission(&mut self, granted: bool) {
        self.0.on_permission(granted);
        self.1.on_permission(granted);
    }

    fn on_update(&mut self, update: &PositionUpdate, engine: &TrackingEngine) {
        self.0.on_update(update, engine);
        self.1.on_update(update, engine);
    }

    fn on_transition(&mut self, transition: &Transition, engine: &TrackingEngine) {
        self.0.on_transition(transition, engine);
        self.1.on_transition(transition, engine);
    }

    fn on_stream_end(&mut self, engine: &TrackingEngine) {
        self.0.on_stream_end(engine);
        self.1.on_stream_end(engine);
    }
}

/// Logs run milestones, and warns when the current speed goes over the
/// active segment's configured maximum.
///
/// One warning per excursion: the speed has to drop back to the limit before
/// the next one is logged.
#[derive(Default)]
pub struct LogObserver {
    limits:     LimitsTable,
    over_limit: bool,
    excursions: usize,
}

impl LogObserver {
    pub fn new(limits: LimitsTable) -> Self {
        Self { limits, over_limit: false, excursions: 0 }
    }

    /// Limit excursions seen so far.
    pub fn excursions(&self) -> usize {
        self.excursions
    }
}

impl TrackingObserver for LogObserver {
    fn on_permission(&mut self, granted: bool) {
        if !granted {
            warn!("location permission denied; no position stream");
        }
    }

    fn on_update(&mut self, _update: &PositionUpdate, engine: &TrackingEngine) {
        let Some(segment) = engine.active_segment() else {
            self.over_limit = false;
            return;
        };
        let speed = engine.session().current_speed_kmh;
        let over = self.limits.exceeds_max(segment, speed);
        if over && !self.over_limit {
            self.excursions += 1;
            if let Some(max) = self.limits.get(segment).and_then(|l| l.max_avg_kmh) {
                warn!("{}: {speed:.1} km/h exceeds max {max:.0} km/h", segment.name);
            }
        }
        self.over_limit = over;
    }

    fn on_transition(&mut self, transition: &Transition, engine: &TrackingEngine) {
        let label = engine
            .active_segment()
            .map_or_else(|| "checkpoint run".to_string(), |s| format!("{} ({})", s.name, s.road));
        match transition {
            Transition::Started { at, .. } => {
                let hint = engine
                    .active_segment()
                    .and_then(|s| self.limits.get(s))
                    .and_then(|l| l.recommended_avg_kmh)
                    .map(|r| format!("; recommended average {r:.0} km/h"))
                    .unwrap_or_default();
                info!("started {label} at {at}{hint}");
            }
            Transition::Finished { average_kmh: Some(avg), .. } => {
                info!("finished {label}: average {avg:.2} km/h");
            }
            Transition::Finished { average_kmh: None, .. } => {
                info!("finished {label}: no average (zero elapsed time)");
            }
        }
    }

    fn on_stream_end(&mut self, engine: &TrackingEngine) {
        info!("position stream ended in phase {}", engine.phase());
    }
}
