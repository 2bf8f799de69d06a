//! Error types for fbps-player HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// fbps-common error; client errors map to 400
    #[error("Common error: {0}")]
    Common(#[from] fbps_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Other(ref err) => {
                error!("Unhandled error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Common(err) => common_error_parts(err),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

fn common_error_parts(err: fbps_common::Error) -> (StatusCode, &'static str, String) {
    use fbps_common::Error;

    match err {
        Error::NotFound(msg) | Error::InvalidInput(msg) => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
        }
        Error::Database(ref db_err) => {
            error!("Database error: {}", db_err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Unable to save players".to_string(),
            )
        }
        other => {
            error!("Common error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            )
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
