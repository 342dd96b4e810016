//! Workspace base error type.
//!
//! Sub-crates define their own error enums and fold `CoreError` into them
//! where a coordinate check fails underneath a loader.

use thiserror::Error;

use crate::Coordinate;

/// The top-level error type for `st-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate {0}: latitude must be in [-90, 90], longitude in [-180, 180]")]
    InvalidCoordinate(Coordinate),
}

/// Shorthand result type for `st-core`.
pub type CoreResult<T> = Result<T, CoreError>;
