//! Filter/sort and cleaning handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tabula::transform::CleaningResult;
use tabula::{
    CleaningOperation, FilterRule, FilterSortEngine, MissingValueStrategy, Row, SortDirection,
    Value,
};

use crate::server::error::ApiError;
use crate::server::payload::{ApiResponse, DatasetPayload, run_blocking};
use crate::server::state::AppState;

/// A filter rule as sent by clients; the operator is parsed by name and
/// the value may be any scalar.
#[derive(Debug, Deserialize)]
pub struct FilterRuleInput {
    #[serde(default)]
    pub column: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub dataset: DatasetPayload,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub filter_rules: Vec<FilterRuleInput>,
    #[serde(default)]
    pub sort_column: String,
    #[serde(default)]
    pub sort_direction: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub filtered_rows: Vec<Row>,
    pub total_rows: usize,
}

/// Apply search, filters and sort to a dataset.
pub async fn process(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ApiResponse<ProcessResponse>>, ApiError> {
    log::info!(
        "POST /api/process ({} rows, {} rules)",
        request.dataset.rows.len(),
        request.filter_rules.len()
    );

    let response = run_blocking(move || {
        let dataset = request.dataset.into_dataset(state.max_rows)?;
        let mut engine = FilterSortEngine::new(&dataset);

        engine.set_search_term(&request.search_term);
        for input in request.filter_rules {
            let rule = FilterRule::new(
                input.column,
                input.operator.parse()?,
                input.value.to_display_string(),
            );
            engine.add_filter_rule(rule)?;
        }

        let direction: SortDirection = match request.sort_direction.as_deref() {
            Some(name) if !name.is_empty() => name.parse()?,
            _ => SortDirection::Asc,
        };
        engine.set_sort(&request.sort_column, direction)?;

        let filtered_rows: Vec<Row> = engine.filtered_rows().into_iter().cloned().collect();
        Ok(ProcessResponse {
            total_rows: filtered_rows.len(),
            filtered_rows,
        })
    })
    .await?;

    Ok(Json(ApiResponse::ok(response)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRequest {
    pub dataset: DatasetPayload,
    pub operation: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub fill_value: Option<Value>,
}

/// Apply one cleaning operation and return the cleaned rows.
pub async fn clean(
    State(state): State<AppState>,
    Json(request): Json<CleanRequest>,
) -> Result<Json<ApiResponse<CleaningResult>>, ApiError> {
    log::info!(
        "POST /api/clean '{}' ({} rows)",
        request.operation,
        request.dataset.rows.len()
    );

    let result = run_blocking(move || {
        let strategy = MissingValueStrategy::from_name(
            request.strategy.as_deref().unwrap_or("remove"),
            request.fill_value,
        )?;
        let operation = CleaningOperation::from_name(&request.operation, request.column, strategy)?;

        let dataset = request.dataset.into_dataset(state.max_rows)?;
        operation.validate(&dataset)?;
        Ok(operation.apply(dataset.rows()))
    })
    .await?;

    let message = format!(
        "{}: {} rows removed, {} cells changed",
        result.description,
        result.rows_removed(),
        result.cells_changed
    );
    Ok(Json(ApiResponse::ok(result).with_message(message)))
}
