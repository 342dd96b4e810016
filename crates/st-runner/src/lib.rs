//! `st-runner`: wires a position source to the tracking engine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`config`]     | `TrackerConfig` (JSON, every field defaulted)            |
//! | [`controller`] | `TrackingController`, `StartOutcome`                     |
//! | [`observer`]   | `TrackingObserver`, `NoopObserver`, `LogObserver`, `Both`|
//! | [`error`]      | `RunnerError`, `RunnerResult<T>`                         |
//!
//! # Example
//!
//! ```rust,ignore
//! let config = TrackerConfig::load(Path::new("tracker.json"))?;
//! let source = ReplaySource::from_csv(Path::new("trace.csv"))?;
//! let mut ctl = TrackingController::from_config(catalog, None, source, SystemClock, &config);
//! let mut log = LogObserver::new(limits);
//! if ctl.start(&mut log)? == StartOutcome::Streaming {
//!     ctl.run(&mut log);
//! }
//! println!("{:?}", ctl.status_line());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod observer;


pub use config::TrackerConfig;
pub use controller::{StartOutcome, TrackingController};
pub use error::{RunnerError, RunnerResult};
pub use observer::{Both, LogObserver, NoopObserver, TrackingObserver};
