//! Error types for st-source.

use thiserror::Error;

/// Errors a position source can report.
///
/// None of these reach the engine: the controller logs them and carries on
/// as if no data arrived this cycle.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider has no fix to give right now.
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// A recorded trace is malformed.
    #[error("bad trace: {0}")]
    Trace(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;
