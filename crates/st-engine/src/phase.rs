//! Tracking phases and permission state.

use std::fmt;

/// Where a tracking session stands.  Only moves forward, except through an
/// explicit reset (back to `WaitingStart`) or restart (back to `Idle`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Permission has not been resolved yet.
    #[default]
    Idle,
    /// Watching for a start geofence.
    WaitingStart,
    /// Inside a segment, timing the traversal.
    Tracking,
    /// Finish geofence reached; terminal until reset.
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle         => "idle",
            Phase::WaitingStart => "waiting_start",
            Phase::Tracking     => "tracking",
            Phase::Finished     => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the position permission request.
///
/// `Denied` together with `Phase::WaitingStart` means "waiting forever, no
/// stream"; `Granted` with no position means "waiting for the first fix".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    #[inline]
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}
