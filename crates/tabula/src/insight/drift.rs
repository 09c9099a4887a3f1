//! Drift between the current dataset and a reference dataset.

use indexmap::IndexMap;
use serde::Serialize;

use crate::inference::mean;
use crate::schema::{Column, ColumnType, Dataset};

use super::InsightEngine;

/// Drift threshold used when the caller gives none.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.1;

/// How a column drifted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriftKind {
    /// Relative change of the column mean.
    #[serde(rename_all = "camelCase")]
    NumericDrift {
        current_value: f64,
        reference_value: f64,
    },
    /// Total variation distance between category distributions.
    CategoricalDrift,
}

/// A column whose distribution moved past the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftRecord {
    pub column: String,
    #[serde(flatten)]
    pub kind: DriftKind,
    /// `"mean"` or `"distribution"`.
    pub metric: String,
    pub drift_score: f64,
    pub significant: bool,
}

impl InsightEngine<'_> {
    /// Compare every column shared with `reference`.
    ///
    /// Numeric columns compare means: `|current - reference| / reference`,
    /// scored 0 when the reference mean is 0. Categorical columns compare
    /// category shares: half the summed absolute difference over the union
    /// of categories. A record is emitted for each score above `threshold`.
    /// The current dataset's column type decides which comparison runs.
    pub fn detect_data_drift(&self, reference: &Dataset, threshold: f64) -> Vec<DriftRecord> {
        let mut records = Vec::new();

        for column in self.dataset.columns() {
            let Some(ref_column) = reference.column(&column.name) else {
                continue;
            };

            let record = match column.column_type {
                ColumnType::Numeric => numeric_drift(column, ref_column),
                ColumnType::Categorical => categorical_drift(column, ref_column),
                _ => None,
            };

            if let Some(record) = record.filter(|r| r.drift_score > threshold) {
                records.push(DriftRecord {
                    significant: true,
                    ..record
                });
            }
        }

        log::debug!(
            "drift against '{}': {} columns drifted",
            reference.name(),
            records.len()
        );
        records
    }
}

fn numeric_drift(current: &Column, reference: &Column) -> Option<DriftRecord> {
    let current_mean = mean(&current.numeric_values())?;
    let reference_mean = mean(&reference.numeric_values())?;

    let score = if reference_mean != 0.0 {
        (current_mean - reference_mean).abs() / reference_mean
    } else {
        0.0
    };

    Some(DriftRecord {
        column: current.name.clone(),
        kind: DriftKind::NumericDrift {
            current_value: current_mean,
            reference_value: reference_mean,
        },
        metric: "mean".to_string(),
        drift_score: score,
        significant: false,
    })
}

fn categorical_drift(current: &Column, reference: &Column) -> Option<DriftRecord> {
    let current_counts = category_counts(current);
    let reference_counts = category_counts(reference);

    let current_total: usize = current_counts.values().sum();
    let reference_total: usize = reference_counts.values().sum();
    if current_total == 0 || reference_total == 0 {
        return None;
    }

    let mut categories: Vec<&String> = current_counts.keys().collect();
    categories.extend(reference_counts.keys().filter(|k| !current_counts.contains_key(*k)));

    let share = |counts: &IndexMap<String, usize>, total: usize, key: &String| {
        counts.get(key).copied().unwrap_or(0) as f64 / total as f64
    };

    let distance: f64 = categories
        .into_iter()
        .map(|key| {
            (share(&current_counts, current_total, key)
                - share(&reference_counts, reference_total, key))
            .abs()
        })
        .sum::<f64>()
        / 2.0;

    Some(DriftRecord {
        column: current.name.clone(),
        kind: DriftKind::CategoricalDrift,
        metric: "distribution".to_string(),
        drift_score: distance,
        significant: false,
    })
}

fn category_counts(column: &Column) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for value in column.present_values() {
        *counts.entry(value.distinct_key()).or_insert(0) += 1;
    }
    counts
}
