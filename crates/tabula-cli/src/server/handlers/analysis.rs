//! Dataset analysis, profile and insight handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tabula::{DataProfile, Dataset, Insight, InsightEngine, Row};

use crate::server::error::ApiError;
use crate::server::payload::{ApiResponse, DatasetPayload, check_row_limit, run_blocking};
use crate::server::state::AppState;

/// Raw rows to analyze.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub data: Vec<Row>,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "dataset".to_string()
}

/// A request that only carries a dataset.
#[derive(Debug, Deserialize)]
pub struct DatasetRequest {
    pub dataset: DatasetPayload,
}

/// Analyze raw rows into a typed dataset.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<Dataset>>, ApiError> {
    check_row_limit(request.data.len(), state.max_rows)?;
    log::info!(
        "POST /api/analyze '{}' ({} rows)",
        request.filename,
        request.data.len()
    );

    let dataset = run_blocking(move || Ok(tabula::analyze(request.data, request.filename))).await?;
    let message = format!("Successfully analyzed {} rows", dataset.total_rows());
    Ok(Json(ApiResponse::ok(dataset).with_message(message)))
}

/// Quality profile of a dataset.
pub async fn data_profile(
    State(state): State<AppState>,
    Json(request): Json<DatasetRequest>,
) -> Result<Json<ApiResponse<DataProfile>>, ApiError> {
    log::info!("POST /api/data-profile ({} rows)", request.dataset.rows.len());

    let profile = run_blocking(move || {
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        Ok(tabula::profile(&dataset))
    })
    .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// Ranked insights for a dataset.
pub async fn insights(
    State(state): State<AppState>,
    Json(request): Json<DatasetRequest>,
) -> Result<Json<ApiResponse<Vec<Insight>>>, ApiError> {
    log::info!("POST /api/insights ({} rows)", request.dataset.rows.len());

    let insights = run_blocking(move || {
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        Ok(InsightEngine::new(&dataset).generate_insights())
    })
    .await?;
    Ok(Json(ApiResponse::ok(insights)))
}
