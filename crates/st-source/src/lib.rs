//! `st-source`: where position updates come from.
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`source`]       | `PositionSource` trait                                |
//! | [`channel`]      | `UpdateSender` / `UpdateReceiver` (mpsc wrappers)     |
//! | [`subscription`] | `Subscription`: idempotent, drop-released handle      |
//! | [`watch`]        | `WatchOptions`, `WatchFilter` (1 s / 5 m cadence)     |
//! | [`replay`]       | `ReplaySource`: recorded CSV trace on a thread        |
//! | [`simulated`]    | `SimulatedDrive`: synthetic drive between waypoints   |
//! | [`error`]        | `SourceError`, `SourceResult<T>`                      |
//!
//! # Delivery model
//!
//! A source pushes [`PositionUpdate`](st_core::PositionUpdate)s into an
//! [`UpdateSender`]; the consumer drains the matching [`UpdateReceiver`] on
//! its own thread, one update at a time.  Only the channel crosses threads.
//! Dropping or releasing the [`Subscription`] stops delivery.

pub mod channel;
pub mod error;
pub mod replay;
pub mod simulated;
pub mod source;
pub mod subscription;
pub mod watch;


pub use channel::{update_channel, Poll, UpdateReceiver, UpdateSender};
pub use error::{SourceError, SourceResult};
pub use replay::{load_trace, read_trace, ReplaySource};
pub use simulated::SimulatedDrive;
pub use source::PositionSource;
pub use subscription::Subscription;
pub use watch::{WatchFilter, WatchOptions};
