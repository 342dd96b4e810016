//! Per-session tracking state and its read-only snapshot.

use st_catalog::{SegmentId, SegmentKey};
use st_core::{Coordinate, Timestamp};

use crate::{PermissionState, Phase};

/// The engine's mutable state.
///
/// Only [`TrackingEngine`](crate::TrackingEngine) mutates a session; callers
/// get `&TrackingSession` or a [`SessionSnapshot`].
///
/// `start_time`, `end_time` and `active_segment` are each written at most
/// once between resets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingSession {
    pub phase:               Phase,
    /// `None` while waiting, and throughout a legacy checkpoint run.
    pub active_segment:      Option<SegmentId>,
    pub start_time:          Option<Timestamp>,
    pub end_time:            Option<Timestamp>,
    /// Survives resets: it describes the device, not the run.
    pub last_known_position: Option<Coordinate>,
    /// Km/h, never negative.  Survives resets.
    pub current_speed_kmh:   f64,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear run progress and return to `WaitingStart`, keeping the live
    /// position and speed.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            phase:               Phase::WaitingStart,
            active_segment:      None,
            start_time:          None,
            end_time:            None,
            last_known_position: self.last_known_position,
            current_speed_kmh:   self.current_speed_kmh,
        };
    }

    /// Elapsed run time, or `None` until both ends are recorded.
    pub fn elapsed_ms(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.millis_since(start)),
            _ => None,
        }
    }
}

/// An immutable copy of what a presentation layer needs for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub phase:               Phase,
    pub permission:          PermissionState,
    pub active_segment:      Option<SegmentKey>,
    pub start_time:          Option<Timestamp>,
    pub end_time:            Option<Timestamp>,
    pub last_known_position: Option<Coordinate>,
    pub current_speed_kmh:   f64,
    /// Final average; only present once `phase == Finished`.
    pub average_kmh:         Option<f64>,
}

impl SessionSnapshot {
    /// `true` when the session waits with no position stream at all.
    pub fn is_stalled(&self) -> bool {
        self.phase == Phase::WaitingStart && self.permission == PermissionState::Denied
    }
}
