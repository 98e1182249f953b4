//! Error types for planport

use thiserror::Error;

/// Result type alias for planport core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for planport core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A task entry in the input file failed validation
    #[error("Invalid task at index {index}: {reason}")]
    InvalidTask { index: usize, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required identifier or environment variable
    #[error("Missing required value: {0}")]
    MissingEnv(String),
}
