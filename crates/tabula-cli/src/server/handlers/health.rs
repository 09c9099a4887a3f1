//! Health check handler.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::payload::ApiResponse;
use crate::server::state::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Report that the server is up.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(
        ApiResponse::ok(HealthStatus {
            status: "healthy",
            version: state.version,
        })
        .with_message("Tabula API is running"),
    )
}

/// JSON 404 for unknown API routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no such endpoint".to_string())
}
