//! Instantaneous speed as reported by a position provider.

/// Conversion factor from metres per second to kilometres per hour.
pub const MPS_TO_KMH: f64 = 3.6;

/// A speed sample that may or may not have been measured.
///
/// Providers omit speed on some fixes and report `NaN` on others; both
/// collapse to [`SpeedReading::Unavailable`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedReading {
    /// Metres per second as reported (may be negative on some devices).
    Measured(f64),
    #[default]
    Unavailable,
}

impl SpeedReading {
    /// Classify a raw provider value.  `None`, `NaN` and infinities are
    /// unavailable.
    pub fn from_raw(mps: Option<f64>) -> Self {
        match mps {
            Some(v) if v.is_finite() => SpeedReading::Measured(v),
            _ => SpeedReading::Unavailable,
        }
    }

    /// Speed in km/h clamped at zero, or `None` when unavailable.
    pub fn kmh(self) -> Option<f64> {
        match self {
            SpeedReading::Measured(mps) => Some((mps * MPS_TO_KMH).max(0.0)),
            SpeedReading::Unavailable => None,
        }
    }

    #[inline]
    pub fn is_measured(self) -> bool {
        matches!(self, SpeedReading::Measured(_))
    }
}

impl From<Option<f64>> for SpeedReading {
    fn from(mps: Option<f64>) -> Self {
        SpeedReading::from_raw(mps)
    }
}
