//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tabula::TabulaError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// Error from the tabula library.
    Tabula(TabulaError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Tabula(e) => {
                let (status, error) = match &e {
                    TabulaError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                    TabulaError::InvalidArgument(_)
                    | TabulaError::EmptyData(_)
                    | TabulaError::UnsupportedFormat(_)
                    | TabulaError::Json(_)
                    | TabulaError::Csv(_) => (StatusCode::BAD_REQUEST, "bad_request"),
                    TabulaError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
                };
                (status, error, e.to_string())
            }
        };

        if status.is_server_error() {
            log::error!("{}: {}", error, message);
        } else {
            log::warn!("{}: {}", error, message);
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<TabulaError> for ApiError {
    fn from(err: TabulaError) -> Self {
        ApiError::Tabula(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Tabula(e) => write!(f, "Tabula error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
