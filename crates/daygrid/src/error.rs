//! Error types for daygrid layout operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid viewport width: {0} (must be finite and wider than the left margin)")]
    InvalidViewport(f64),

    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
