//! NVDB adapter error type.

use thiserror::Error;

use crate::LayerKind;

/// Errors produced by `rw-nvdb`.
///
/// Only whole-response failures surface here.  A single object with
/// unusable geometry is dropped from its layer, not reported.
#[derive(Debug, Error)]
pub enum NvdbError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0:?} is not a road-object layer")]
    NotAnObjectLayer(LayerKind),
}

pub type NvdbResult<T> = Result<T, NvdbError>;
