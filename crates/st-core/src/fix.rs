//! A single reported device location.

use crate::{Coordinate, SpeedReading, Timestamp};

/// One position update from the device: where, how fast, and when.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionUpdate {
    pub position:  Coordinate,
    pub speed:     SpeedReading,
    pub timestamp: Timestamp,
}

impl PositionUpdate {
    pub fn new(position: Coordinate, speed: SpeedReading, timestamp: Timestamp) -> Self {
        Self { position, speed, timestamp }
    }

    /// An update without a speed reading.
    pub fn at(position: Coordinate, timestamp: Timestamp) -> Self {
        Self { position, speed: SpeedReading::Unavailable, timestamp }
    }

    /// Builder-style speed in metres per second.
    pub fn with_speed_mps(mut self, mps: f64) -> Self {
        self.speed = SpeedReading::from_raw(Some(mps));
        self
    }
}
