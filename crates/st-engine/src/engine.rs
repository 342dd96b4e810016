//! The tracking engine: feeds position updates through the phase rules.

use log::{debug, info};

use st_catalog::{CheckpointPair, ScanStrategy, Segment, SegmentCatalog, SegmentId};
use st_core::{is_near, Coordinate, PositionUpdate, Timestamp, DEFAULT_RADIUS_M};

use crate::{PermissionState, Phase, SessionSnapshot, TrackingSession};

/// Tunables for [`TrackingEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Radius for segments without their own, and for the legacy
    /// checkpoints.  Default: 30 m.
    pub default_radius_m: f64,
    /// How the catalog is searched for a start geofence.
    pub scan: ScanStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_radius_m: DEFAULT_RADIUS_M,
            scan:             ScanStrategy::Linear,
        }
    }
}

/// A phase change produced by [`TrackingEngine::on_update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// `WaitingStart → Tracking`.  `segment` is `None` for a checkpoint run.
    Started {
        segment: Option<SegmentId>,
        at:      Timestamp,
    },
    /// `Tracking → Finished`.
    Finished {
        segment:     Option<SegmentId>,
        at:          Timestamp,
        average_kmh: Option<f64>,
    },
}

/// Owns the segment catalog, the optional legacy checkpoints and one
/// [`TrackingSession`].
///
/// Strictly single-owner: every method that changes state takes `&mut self`,
/// so an embedder running on several threads must put the engine behind one
/// lock.
pub struct TrackingEngine {
    catalog:     SegmentCatalog,
    checkpoints: Option<CheckpointPair>,
    config:      EngineConfig,
    session:     TrackingSession,
    permission:  PermissionState,
}

impl TrackingEngine {
    /// Create an engine in `Idle`.  Pass `checkpoints = None` to disable the
    /// legacy start/finish pair.
    pub fn new(
        catalog:     SegmentCatalog,
        checkpoints: Option<CheckpointPair>,
        config:      EngineConfig,
    ) -> Self {
        Self {
            catalog,
            checkpoints,
            config,
            session:    TrackingSession::new(),
            permission: PermissionState::Unknown,
        }
    }

    // ── Inputs ────────────────────────────────────────────────────────────

    /// Record the permission outcome.  From `Idle` the engine moves to
    /// `WaitingStart` whether or not permission was granted; a denial just
    /// means no fixes will ever arrive.
    pub fn on_permission(&mut self, granted: bool) -> Phase {
        self.permission = if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        if self.session.phase == Phase::Idle {
            self.session.phase = Phase::WaitingStart;
            info!("permission {}; waiting for a start geofence", if granted { "granted" } else { "denied" });
        }
        self.session.phase
    }

    /// Record the one-shot initial position.  Updates position and speed
    /// only; no geofence rule is evaluated.
    pub fn apply_initial_fix(&mut self, update: &PositionUpdate) {
        self.record_live(update);
    }

    /// Process one position update and return the transition it fired, if
    /// any.
    pub fn on_update(&mut self, update: &PositionUpdate) -> Option<Transition> {
        self.record_live(update);
        let p = update.position;
        let t = update.timestamp;

        let transition = match self.session.phase {
            Phase::WaitingStart if self.session.active_segment.is_none() => self.try_start(p, t),
            Phase::Tracking => self.try_finish(p, t),
            _ => None,
        };

        debug!(
            "update {} at {} -> {} ({:.1} km/h)",
            p, t, self.session.phase, self.session.current_speed_kmh
        );
        transition
    }

    /// Clear run progress: back to `WaitingStart`, no segment, no times.
    /// Last known position and current speed are kept.
    pub fn reset(&mut self) {
        self.session.reset();
        info!("session reset; waiting for a start geofence");
    }

    /// Return to `Idle` with permission unresolved, as on a fresh launch.
    /// Last known position and current speed are kept.
    pub fn restart(&mut self) {
        self.session.reset();
        self.session.phase = Phase::Idle;
        self.permission = PermissionState::Unknown;
    }

    // ── Rules ─────────────────────────────────────────────────────────────

    fn try_start(&mut self, p: Coordinate, t: Timestamp) -> Option<Transition> {
        let radius = self.config.default_radius_m;

        if let Some(cp) = &self.checkpoints {
            if is_near(cp.start.position, Some(p), radius) {
                self.begin(None, t);
                return Some(Transition::Started { segment: None, at: t });
            }
        }

        let id = self.catalog.first_start_match(p, radius, self.config.scan)?;
        self.begin(Some(id), t);
        Some(Transition::Started { segment: Some(id), at: t })
    }

    fn begin(&mut self, segment: Option<SegmentId>, t: Timestamp) {
        self.session.active_segment = segment;
        self.session.start_time.get_or_insert(t);
        self.session.phase = Phase::Tracking;
        match segment.and_then(|id| self.catalog.get(id)) {
            Some(s) => info!("entered {}|{} at {}", s.road, s.name, t),
            None => info!("entered checkpoint start at {}", t),
        }
    }

    fn try_finish(&mut self, p: Coordinate, t: Timestamp) -> Option<Transition> {
        let default_radius = self.config.default_radius_m;
        let (finish, radius) = match self.active_segment() {
            Some(s) => (s.finish, s.radius_or(default_radius)),
            None => (self.checkpoints.as_ref()?.finish.position, default_radius),
        };
        if !is_near(finish, Some(p), radius) {
            return None;
        }

        self.session.end_time.get_or_insert(t);
        self.session.phase = Phase::Finished;
        let average_kmh = self.average_kmh();
        info!(
            "finished at {}; average {}",
            t,
            average_kmh.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2} km/h"))
        );
        Some(Transition::Finished {
            segment: self.session.active_segment,
            at: t,
            average_kmh,
        })
    }

    fn record_live(&mut self, update: &PositionUpdate) {
        self.session.last_known_position = Some(update.position);
        if let Some(kmh) = update.speed.kmh() {
            self.session.current_speed_kmh = kmh;
        }
    }

    // ── Outputs ───────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    pub fn checkpoints(&self) -> Option<&CheckpointPair> {
        self.checkpoints.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.session.active_segment.and_then(|id| self.catalog.get(id))
    }

    /// Active segment start, else the checkpoint start.
    pub fn effective_start(&self) -> Option<Coordinate> {
        match self.active_segment() {
            Some(s) => Some(s.start),
            None => self.checkpoints.as_ref().map(|cp| cp.start.position),
        }
    }

    /// Active segment finish, else the checkpoint finish.
    pub fn effective_finish(&self) -> Option<Coordinate> {
        match self.active_segment() {
            Some(s) => Some(s.finish),
            None => self.checkpoints.as_ref().map(|cp| cp.finish.position),
        }
    }

    /// Final average speed in km/h over the straight start → finish line.
    ///
    /// `None` unless the session is finished with a positive elapsed time.
    pub fn average_kmh(&self) -> Option<f64> {
        if self.session.phase != Phase::Finished {
            return None;
        }
        let elapsed_ms = self.session.elapsed_ms()?;
        if elapsed_ms <= 0 {
            return None;
        }
        let hours = elapsed_ms as f64 / 3_600_000.0;
        let km = self.effective_start()?.distance_m(self.effective_finish()?) / 1000.0;
        Some(km / hours)
    }

    /// Live average in km/h from the effective start to the last known
    /// position, timed against `now` rather than the last fix.
    ///
    /// Returns `0.0` when the start time or position is unknown, or when no
    /// time has elapsed.
    pub fn live_average_kmh(&self, now: Timestamp) -> f64 {
        let (Some(start_time), Some(current), Some(start)) = (
            self.session.start_time,
            self.session.last_known_position,
            self.effective_start(),
        ) else {
            return 0.0;
        };
        let hours = now.hours_since(start_time);
        if hours <= 0.0 {
            return 0.0;
        }
        start.distance_m(current) / 1000.0 / hours
    }

    /// Copy out everything a render needs.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase:               self.session.phase,
            permission:          self.permission,
            active_segment:      self.active_segment().map(Segment::key),
            start_time:          self.session.start_time,
            end_time:            self.session.end_time,
            last_known_position: self.session.last_known_position,
            current_speed_kmh:   self.session.current_speed_kmh,
            average_kmh:         self.average_kmh(),
        }
    }

    /// The stats-bar line: final average once finished, the live average
    /// while a catalog segment is being tracked, otherwise nothing.
    pub fn status_line(&self, now: Timestamp) -> Option<String> {
        match self.session.phase {
            Phase::Finished => self
                .average_kmh()
                .map(|avg| format!("Average Speed: {avg:.2} km/h")),
            Phase::Tracking if self.session.last_known_position.is_some() => self
                .active_segment()
                .map(|s| format!("{}: live avg {:.2} km/h", s.name, self.live_average_kmh(now))),
            _ => None,
        }
    }
}
