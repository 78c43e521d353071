//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers the
//! validating constructors that live in this crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid bounding box: {0}")]
    InvalidBBox(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `rw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
