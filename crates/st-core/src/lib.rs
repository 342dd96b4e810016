//! `st-core`: foundational types for the `segtrack` workspace.
//!
//! This crate is a dependency of every other `st-*` crate.  It has no `st-*`
//! dependencies and only `thiserror` plus optional `serde` from outside.
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`geo`]     | `Coordinate`, haversine distance, `is_near`, bearing     |
//! | [`fix`]     | `PositionUpdate`: position, speed reading, timestamp     |
//! | [`time`]    | `Timestamp`, `Clock`, `SystemClock`, `ManualClock`       |
//! | [`speed`]   | `SpeedReading` (measured / unavailable), m/s → km/h      |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod fix;
pub mod geo;
pub mod speed;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use fix::PositionUpdate;
pub use geo::{bearing_deg, distance_m, is_near, Coordinate, DEFAULT_RADIUS_M, EARTH_RADIUS_M};
pub use speed::SpeedReading;
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
