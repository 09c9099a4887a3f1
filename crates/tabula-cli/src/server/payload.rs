//! Request and response envelopes shared by the handlers.

use serde::{Deserialize, Serialize};
use tabula::{Dataset, Row};

use super::error::ApiError;

/// Response envelope for every successful call.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A dataset as sent by clients.
///
/// Only `name` and `rows` are read; a dataset returned by `/api/analyze` can
/// be sent back as is and its column metadata is rebuilt from the rows.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetPayload {
    #[serde(default = "default_name")]
    pub name: String,
    pub rows: Vec<Row>,
}

fn default_name() -> String {
    "dataset".to_string()
}

impl DatasetPayload {
    /// Analyze the rows, rejecting payloads over `max_rows`.
    pub fn into_dataset(self, max_rows: usize) -> Result<Dataset, ApiError> {
        check_row_limit(self.rows.len(), max_rows)?;
        Ok(tabula::analyze(self.rows, self.name))
    }
}

pub fn check_row_limit(rows: usize, max_rows: usize) -> Result<(), ApiError> {
    if rows > max_rows {
        return Err(ApiError::BadRequest(format!(
            "payload has {} rows; the limit is {}",
            rows, max_rows
        )));
    }
    Ok(())
}

/// Run CPU-bound analysis off the async runtime.
pub async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {}", e)))?
}
