//! The `TrackingController`: owns an engine, a source and the one live
//! subscription between them.

use log::{debug, info, warn};

use st_catalog::{CheckpointPair, SegmentCatalog};
use st_core::{Clock, PositionUpdate};
use st_engine::{SessionSnapshot, TrackingEngine, Transition};
use st_source::{update_channel, Poll, PositionSource, Subscription, UpdateReceiver, WatchOptions};

use crate::{RunnerResult, TrackerConfig, TrackingObserver};

/// How [`TrackingController::start`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// The engine waits with no stream.  Only [`restart`] can recover.
    ///
    /// [`restart`]: TrackingController::restart
    PermissionDenied,
    /// A subscription is open and updates can be pumped.
    Streaming,
}

/// Runs one tracking session.
///
/// At most one subscription is live at any time: `start` and `restart`
/// release the previous one before subscribing again, and dropping the
/// controller releases whatever is still open.
///
/// Updates are handled on the caller's thread, strictly one at a time and
/// in arrival order.
pub struct TrackingController<S: PositionSource, C: Clock> {
    engine:         TrackingEngine,
    source:         S,
    clock:          C,
    watch:          WatchOptions,
    stop_on_finish: bool,
    subscription:   Option<Subscription>,
    updates:        Option<UpdateReceiver>,
}

impl<S: PositionSource, C: Clock> TrackingController<S, C> {
    /// Wrap an engine with default watch options, never stopping on finish.
    pub fn new(engine: TrackingEngine, source: S, clock: C) -> Self {
        Self {
            engine,
            source,
            clock,
            watch:          WatchOptions::default(),
            stop_on_finish: false,
            subscription:   None,
            updates:        None,
        }
    }

    /// Build the engine and controller from one [`TrackerConfig`].
    pub fn from_config(
        catalog:     SegmentCatalog,
        checkpoints: Option<CheckpointPair>,
        source:      S,
        clock:       C,
        config:      &TrackerConfig,
    ) -> Self {
        let engine = TrackingEngine::new(catalog, checkpoints, config.engine_config());
        Self::new(engine, source, clock)
            .with_watch(config.watch)
            .with_stop_on_finish(config.stop_on_finish)
    }

    pub fn with_watch(mut self, watch: WatchOptions) -> Self {
        self.watch = watch;
        self
    }

    pub fn with_stop_on_finish(mut self, stop: bool) -> Self {
        self.stop_on_finish = stop;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Request permission, seed the initial fix and open the subscription.
    ///
    /// A failed initial fix is logged and ignored.
    ///
    /// # Errors
    ///
    /// Only if the source fails to subscribe.  The engine is then in
    /// `WaitingStart` with no stream, as after a denial.
    pub fn start<O: TrackingObserver>(&mut self, observer: &mut O) -> RunnerResult<StartOutcome> {
        self.release();

        let granted = self.source.request_permission();
        self.engine.on_permission(granted);
        observer.on_permission(granted);
        if !self.engine.permission().is_granted() {
            warn!("permission denied; staying in {}", self.engine.phase());
            return Ok(StartOutcome::PermissionDenied);
        }

        match self.source.current_position() {
            Ok(fix) => self.engine.apply_initial_fix(&fix),
            Err(e) => debug!("no initial fix: {e}"),
        }

        let (tx, rx) = update_channel();
        self.subscription = Some(self.source.subscribe(&self.watch, tx)?);
        self.updates = Some(rx);
        info!("subscribed (every {} ms or {} m)", self.watch.min_interval_ms, self.watch.min_distance_m);
        Ok(StartOutcome::Streaming)
    }

    /// Process every update already queued, without blocking.  Returns how
    /// many were processed.
    pub fn pump<O: TrackingObserver>(&mut self, observer: &mut O) -> usize {
        let Some(rx) = self.updates.take() else {
            return 0;
        };
        let mut processed = 0;
        loop {
            match rx.poll() {
                Poll::Ready(update) => {
                    processed += 1;
                    if !self.process(&update, observer) {
                        observer.on_stream_end(&self.engine);
                        return processed;
                    }
                }
                Poll::Empty => break,
                Poll::Closed => {
                    self.end_stream(observer);
                    return processed;
                }
            }
        }
        self.updates = Some(rx);
        processed
    }

    /// Block until the stream ends, or until the session finishes when
    /// `stop_on_finish` is set.  Returns how many updates were processed.
    pub fn run<O: TrackingObserver>(&mut self, observer: &mut O) -> usize {
        let Some(rx) = self.updates.take() else {
            return 0;
        };
        let mut processed = 0;
        while let Some(update) = rx.recv() {
            processed += 1;
            if !self.process(&update, observer) {
                observer.on_stream_end(&self.engine);
                return processed;
            }
        }
        self.end_stream(observer);
        processed
    }

    /// Clear run progress; the subscription stays open.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Release the subscription, return the engine to `Idle`, and start over.
    pub fn restart<O: TrackingObserver>(&mut self, observer: &mut O) -> RunnerResult<StartOutcome> {
        self.release();
        self.engine.restart();
        self.start(observer)
    }

    /// Release the subscription.  Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.release();
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn engine(&self) -> &TrackingEngine {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// `true` while a subscription is open.
    pub fn is_streaming(&self) -> bool {
        self.updates.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.engine.snapshot()
    }

    /// Live average against the controller's clock.
    pub fn live_average_kmh(&self) -> f64 {
        self.engine.live_average_kmh(self.clock.now())
    }

    pub fn status_line(&self) -> Option<String> {
        self.engine.status_line(self.clock.now())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Apply one update.  Returns `false` when delivery should stop.
    fn process<O: TrackingObserver>(&mut self, update: &PositionUpdate, observer: &mut O) -> bool {
        let transition = self.engine.on_update(update);
        observer.on_update(update, &self.engine);
        let Some(transition) = transition else {
            return true;
        };
        observer.on_transition(&transition, &self.engine);
        if self.stop_on_finish && matches!(transition, Transition::Finished { .. }) {
            info!("run finished; releasing subscription, current speed is frozen");
            self.release();
            return false;
        }
        true
    }

    fn end_stream<O: TrackingObserver>(&mut self, observer: &mut O) {
        debug!("position stream closed");
        self.release();
        observer.on_stream_end(&self.engine);
    }

    fn release(&mut self) {
        if let Some(mut sub) = self.subscription.take() {
            sub.release();
            debug!("subscription released");
        }
        self.updates = None;
    }
}

impl<S: PositionSource, C: Clock> Drop for TrackingController<S, C> {
    fn drop(&mut self) {
        self.release();
    }
}
