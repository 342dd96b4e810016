//! `st-output`: records of finished runs.
//!
//! | Writer         | Files created |
//! |----------------|---------------|
//! | `CsvRunWriter` | `runs.csv`    |
//!
//! Writers implement [`RunWriter`] and are driven by [`RunOutputObserver`],
//! which implements `st_runner::TrackingObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use st_output::{CsvRunWriter, RunOutputObserver};
//!
//! let writer = CsvRunWriter::new(Path::new("./output"))?;
//! let mut obs = RunOutputObserver::new(writer);
//! controller.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}") }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvRunWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RunOutputObserver;
pub use row::RunRecord;
pub use writer::RunWriter;
