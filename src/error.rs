use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Failures raised by the JSON file store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("database file is not a valid document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to serialize database document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Invalid service configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("chirp is too long")]
    TooLong,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TooLong => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::Decode(err) => {
                tracing::warn!(target: "chirpy::error", error = %err, "Failed to decode request body");
                (status, Json(ApiResponse::error("Something went wrong"))).into_response()
            }
            ApiError::TooLong => {
                (status, Json(ApiResponse::error("Chirp is too long"))).into_response()
            }
            // No message is attached for storage failures; the cause is only logged.
            ApiError::Storage(err) => {
                tracing::error!(target: "chirpy::error", error = %err, "Database operation failed");
                status.into_response()
            }
        }
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
