//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::error;

use parkwx_store::StoreError;
use parkwx_telemetry::Metrics;

use crate::types::ErrorBody;

/// Message returned by `/api/weather/latest` on an empty store.
pub const NO_WEATHER_DATA: &str = "No weather data available";

/// Errors a handler can return.
///
/// Internal causes are logged when the error is built; the client only ever
/// sees the endpoint's generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Wrap a store failure on `endpoint`, logging and counting it.
    pub fn internal(endpoint: &'static str, message: &'static str, source: StoreError) -> Self {
        error!(endpoint, error = %source, "{message}");
        Metrics::http_error(endpoint);
        Self::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_hides_source() {
        let err = ApiError::internal(
            "alerts",
            "Failed to fetch alerts",
            StoreError::Unavailable("disk on fire".to_string()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch alerts");
    }

    #[test]
    fn test_not_found_status() {
        let err = ApiError::NotFound(NO_WEATHER_DATA);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), NO_WEATHER_DATA);
    }
}
