//! Error types for parkwx-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid reading: {0}")]
    InvalidReading(String),

    #[error("Invalid alert: {0}")]
    InvalidAlert(String),

    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Unknown value for {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
