//! API Error Types
//!
//! Defines error types for the HTTP layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::data::UploadError;
use crate::map::FlowError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uploaded file could not be parsed
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Map flow failed
    #[error("{0}")]
    Flow(#[from] FlowError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Upload(_) => (StatusCode::BAD_REQUEST, "UPLOAD_ERROR"),
            ApiError::Flow(FlowError::Boundaries(_)) => {
                (StatusCode::BAD_GATEWAY, "BOUNDARY_FETCH_ERROR")
            }
            ApiError::Flow(FlowError::NoMetricColumns) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_METRIC_COLUMNS")
            }
            ApiError::Flow(FlowError::PaletteOverflow { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "PALETTE_OVERFLOW")
            }
            ApiError::Flow(FlowError::Serialization(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::BoundaryError;

    #[test]
    fn test_status_codes() {
        let err = ApiError::Upload(UploadError::MissingCountryColumn);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Flow(FlowError::PaletteOverflow {
            columns: 8,
            palette: 6,
        });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = ApiError::Flow(FlowError::Boundaries(BoundaryError::Parse(
            "eof".to_string(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
