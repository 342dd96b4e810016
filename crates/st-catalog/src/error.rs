use thiserror::Error;

/// Errors produced while loading or validating catalog inputs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate segment key {road:?}|{name:?}")]
    DuplicateKey { road: String, name: String },

    #[error("invalid segment {key}: {reason}")]
    InvalidSegment { key: String, reason: String },

    #[error("invalid checkpoints: {0}")]
    Checkpoints(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
