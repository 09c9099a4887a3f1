//! Prediction model, feature importance and drift handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tabula::insight::DEFAULT_DRIFT_THRESHOLD;
use tabula::{DriftRecord, FeatureImportance, InsightEngine, PredictionModel};

use crate::server::error::ApiError;
use crate::server::payload::{ApiResponse, DatasetPayload, check_row_limit, run_blocking};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub dataset: DatasetPayload,
    pub target_column: String,
    pub feature_columns: Vec<String>,
}

/// Fit a single-feature regression; `data` is null when no model fits.
pub async fn prediction_model(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<ApiResponse<Option<PredictionModel>>>, ApiError> {
    log::info!(
        "POST /api/prediction-model target '{}' ({} rows)",
        request.target_column,
        request.dataset.rows.len()
    );

    let model = run_blocking(move || {
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        Ok(InsightEngine::new(&dataset)
            .create_prediction_model(&request.target_column, &request.feature_columns))
    })
    .await?;

    let response = match model {
        Some(model) => ApiResponse::ok(Some(model)),
        None => ApiResponse::ok(None)
            .with_message("not enough numeric pairs (at least 10) or a constant feature"),
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImportanceRequest {
    pub dataset: DatasetPayload,
    pub target_column: String,
}

/// Rank numeric features by correlation with the target.
pub async fn feature_importance(
    State(state): State<AppState>,
    Json(request): Json<FeatureImportanceRequest>,
) -> Result<Json<ApiResponse<Vec<FeatureImportance>>>, ApiError> {
    log::info!(
        "POST /api/feature-importance target '{}' ({} rows)",
        request.target_column,
        request.dataset.rows.len()
    );

    let ranking = run_blocking(move || {
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        Ok(InsightEngine::new(&dataset).calculate_feature_importance(&request.target_column))
    })
    .await?;

    Ok(Json(ApiResponse::ok(ranking)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftRequest {
    pub dataset: DatasetPayload,
    pub reference: DatasetPayload,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Compare a dataset against a reference dataset.
pub async fn drift(
    State(state): State<AppState>,
    Json(request): Json<DriftRequest>,
) -> Result<Json<ApiResponse<Vec<DriftRecord>>>, ApiError> {
    check_row_limit(request.reference.rows.len(), state.max_rows)?;
    log::info!(
        "POST /api/drift ({} rows vs {} reference rows)",
        request.dataset.rows.len(),
        request.reference.rows.len()
    );

    let threshold = request.threshold.unwrap_or(DEFAULT_DRIFT_THRESHOLD);
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "threshold must be a non-negative number, got {}",
            threshold
        )));
    }

    let records = run_blocking(move || {
        let current = request.dataset.into_dataset(state.max_rows)?;
        let reference = request.reference.into_dataset(state.max_rows)?;
        Ok(InsightEngine::new(&current).detect_data_drift(&reference, threshold))
    })
    .await?;

    Ok(Json(ApiResponse::ok(records)))
}
