//! Chart data and recommendation handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tabula::chart::DEFAULT_POINT_LIMIT;
use tabula::{ChartConfig, ChartData, ChartDataGenerator, ChartRecommendation, ChartType};

use super::DatasetRequest;
use crate::server::error::ApiError;
use crate::server::payload::{ApiResponse, DatasetPayload, run_blocking};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataRequest {
    pub dataset: DatasetPayload,
    pub chart_type: String,
    pub x_column: String,
    #[serde(default)]
    pub y_column: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Build the data for one chart.
pub async fn chart_data(
    State(state): State<AppState>,
    Json(request): Json<ChartDataRequest>,
) -> Result<Json<ApiResponse<ChartData>>, ApiError> {
    log::info!(
        "POST /api/chart-data {} ({} rows)",
        request.chart_type,
        request.dataset.rows.len()
    );

    let data = run_blocking(move || {
        let chart_type: ChartType = request.chart_type.parse()?;
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        let config = ChartConfig::new(chart_type, request.x_column, request.y_column);
        let limit = request.limit.unwrap_or(DEFAULT_POINT_LIMIT);
        Ok(ChartDataGenerator::new(&dataset).chart_data(&config, limit)?)
    })
    .await?;

    Ok(Json(ApiResponse::ok(data)))
}

/// Suggest charts suited to the dataset's column types.
pub async fn chart_recommendations(
    State(state): State<AppState>,
    Json(request): Json<DatasetRequest>,
) -> Result<Json<ApiResponse<Vec<ChartRecommendation>>>, ApiError> {
    log::info!(
        "POST /api/chart-recommendations ({} rows)",
        request.dataset.rows.len()
    );

    let recommendations = run_blocking(move || {
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        Ok(ChartDataGenerator::new(&dataset).recommended_charts())
    })
    .await?;

    Ok(Json(ApiResponse::ok(recommendations)))
}
