//! Matching-subsystem error type.

use thiserror::Error;

/// Errors produced by `rw-match`.
///
/// Only configuration can fail; a matching pass over noisy data degrades to
/// partial results instead of erroring.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),

    #[error("max match distance must be finite and positive, got {0} m")]
    InvalidMaxDistance(f64),

    #[error("attribute key `{0}` must not be empty")]
    EmptyKey(&'static str),
}

pub type MatchResult<T> = Result<T, MatchError>;
