//! Timestamps and the clock abstraction.
//!
//! # Design
//!
//! Every instant is a `Timestamp`: integer milliseconds since the Unix epoch,
//! matching what mobile position providers stamp on their fixes.  Integer
//! storage keeps start/end comparisons exact; conversion to fractional hours
//! happens only at the point where an average speed is computed.
//!
//! The live average is evaluated against "now" rather than against the last
//! fix, so the current time is injected through the [`Clock`] trait.  Use
//! [`SystemClock`] in applications and [`ManualClock`] in tests.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const MS_PER_HOUR: f64 = 3_600_000.0;

// ── Timestamp ────────────────────────────────────────────────────────────────

/// Milliseconds since the Unix epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Return the timestamp `ms` milliseconds after `self`.
    #[inline]
    pub fn offset_ms(self, ms: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(ms))
    }

    /// Signed milliseconds elapsed from `earlier` to `self`.
    ///
    /// Negative when `earlier` is actually later (clock skew between the
    /// provider and the caller's clock).
    #[inline]
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0 as i64 - earlier.0 as i64
    }

    /// Signed fractional hours elapsed from `earlier` to `self`.
    #[inline]
    pub fn hours_since(self, earlier: Timestamp) -> f64 {
        self.millis_since(earlier) as f64 / MS_PER_HOUR
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Source of "now" for live computations.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from [`SystemTime`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A system clock before 1970 reads as the epoch.
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(ms)
    }
}

/// A clock that only moves when told to.  `Sync`, so it can be shared with a
/// source thread in tests.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        ManualClock(AtomicU64::new(start.0))
    }

    pub fn set(&self, t: Timestamp) {
        self.0.store(t.0, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.0.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
