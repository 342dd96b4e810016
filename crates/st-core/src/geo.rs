//! Geographic coordinate type and great-circle helpers.
//!
//! `Coordinate` uses `f64` latitude/longitude.  GPS fixes arrive with ~7
//! significant decimals and geofence radii are tens of metres, so the extra
//! precision keeps `is_near` decisions stable right at the fence boundary.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres used by every distance computation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geofence radius applied when a segment does not configure its own.
pub const DEFAULT_RADIUS_M: f64 = 30.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    #[cfg_attr(feature = "serde", serde(rename = "latitude"))]
    pub lat: f64,
    #[cfg_attr(feature = "serde", serde(rename = "longitude"))]
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside the WGS-84 ranges.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Return `self` if [`is_valid`](Self::is_valid), otherwise
    /// [`CoreError::InvalidCoordinate`].
    pub fn validate(self) -> CoreResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(CoreError::InvalidCoordinate(self))
        }
    }

    /// Haversine great-circle distance to `other` in metres.
    #[inline]
    pub fn distance_m(self, other: Coordinate) -> f64 {
        distance_m(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between `a` and `b` in metres.
///
/// Symmetric, non-negative, and exactly `0.0` when `a == b`.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// `true` iff `candidate` is present and lies within `radius_m` of `point`.
///
/// A missing candidate (no fix yet) is never near anything.
#[inline]
pub fn is_near(point: Coordinate, candidate: Option<Coordinate>, radius_m: f64) -> bool {
    match candidate {
        Some(c) => distance_m(point, c) <= radius_m,
        None => false,
    }
}

/// Initial great-circle bearing from `a` towards `b`, in degrees `[0, 360)`.
///
/// 0° is north, 90° east.  Route-snapping tools use this to request the
/// carriageway that runs in the segment's direction of travel.
pub fn bearing_deg(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let deg = y.atan2(x).to_degrees();
    (deg + 360.0) % 360.0
}
