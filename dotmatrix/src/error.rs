//! Error type shared by the dotmatrix crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DotMatrixError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot render a {width}x{height} snapshot")]
    EmptySnapshot { width: u32, height: u32 },

    #[error("png encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DotMatrixError>;
