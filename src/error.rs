use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
