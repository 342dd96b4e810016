use st_source::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    /// The source refused to open a subscription.
    #[error("position source error: {0}")]
    Source(#[from] SourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type RunnerResult<T> = Result<T, RunnerError>;
