//! `st-engine`: the segment-tracking state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`phase`]   | `Phase`, `PermissionState`                                  |
//! | [`session`] | `TrackingSession` (owned state), `SessionSnapshot` (copy)   |
//! | [`engine`]  | `TrackingEngine`, `EngineConfig`, `Transition`              |
//!
//! # Phase model
//!
//! ```text
//!   idle ──permission──▶ waiting_start ──start fence──▶ tracking ──finish fence──▶ finished
//!                             ▲                                                        │
//!                             └──────────────────────── reset ─────────────────────────┘
//! ```
//!
//! Each position update is evaluated once, in arrival order, and fires at
//! most one transition.  While waiting, the legacy checkpoint start is tried
//! before the catalog; the catalog is scanned in definition order and the
//! first start geofence that contains the fix wins.
//!
//! Every update refreshes the last known position and, when the fix carries
//! a measured speed, the current speed.  Neither is cleared by a reset.

pub mod engine;
pub mod phase;
pub mod session;


pub use engine::{EngineConfig, TrackingEngine, Transition};
pub use phase::{PermissionState, Phase};
pub use session::{SessionSnapshot, TrackingSession};
