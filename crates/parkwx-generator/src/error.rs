//! Generator error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Validation error: {0}")]
    Validation(#[from] parkwx_core::CoreError),

    #[error("Store error: {0}")]
    Store(#[from] parkwx_store::StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink error: {0}")]
    Sink(String),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
