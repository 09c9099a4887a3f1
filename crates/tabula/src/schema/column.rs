//! Column metadata and descriptive statistics.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::input::Value;

/// Descriptive statistics for a numeric sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (0 for a single value).
    pub std: f64,
    /// Sample variance (0 for a single value).
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    /// Five-point summary: min, Q1, median, Q3, max.
    pub quartiles: [f64; 5],
}

impl ColumnStats {
    pub fn q1(&self) -> f64 {
        self.quartiles[1]
    }

    pub fn q3(&self) -> f64 {
        self.quartiles[3]
    }

    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3() - self.q1()
    }
}

/// A column derived from the dataset rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name, unique within the dataset.
    pub name: String,
    /// Inferred data type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// One value per row; absent keys are stored as `Null`.
    pub values: Vec<Value>,
    /// Null or empty-text cells.
    pub missing_count: usize,
    /// Distinct non-missing values.
    pub unique_count: usize,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }

    /// Values that parse as finite numbers, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_number).collect()
    }

    /// Non-missing values, in row order.
    pub fn present_values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Percentage of non-missing cells (0 for an empty column).
    pub fn completeness(&self) -> f64 {
        let total = self.values.len();
        if total == 0 {
            0.0
        } else {
            (total - self.missing_count) as f64 / total as f64 * 100.0
        }
    }
}
