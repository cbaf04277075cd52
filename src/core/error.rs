//! Engine errors
//!
//! Only construction and loading can fail. Per-tick operations absorb bad
//! input (out-of-bounds coordinates, unknown material ids) instead of
//! returning errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("failed to allocate {cells} grid cells")]
    Allocation { cells: usize },

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown material key: {0}")]
    UnknownMaterial(String),

    #[error("material '{key}': {reason}")]
    InvalidMaterial { key: String, reason: String },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("worker pool: {0}")]
    WorkerPool(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
