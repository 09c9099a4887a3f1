//! Dataset quality profile.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::inference::detect_outliers;
use crate::input::{Row, Value};
use crate::schema::{Column, ColumnType, Dataset};

static REPEATED_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Size and completeness overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    pub total_rows: usize,
    pub total_columns: usize,
    pub memory_usage: usize,
    /// Percentage of non-missing cells (0 for an empty dataset).
    pub completeness: f64,
}

/// Counts of data quality issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIssues {
    /// Rows that repeat an earlier row exactly.
    pub duplicates: usize,
    /// Missing cells across all columns.
    pub missing_values: usize,
    /// IQR outliers summed over numeric columns.
    pub outliers: usize,
    /// Numeric columns holding at least one present, unparseable value.
    pub inconsistent_types: usize,
    /// Label columns with stray or repeated whitespace.
    pub text_issues: usize,
}

/// Per-column completeness breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub unique_count: usize,
    pub missing_count: usize,
    pub completeness: f64,
}

/// Overview, quality counts and per-column breakdown for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataProfile {
    pub overview: ProfileOverview,
    pub quality: QualityIssues,
    pub columns: Vec<ColumnProfile>,
}

/// Build the quality profile of a dataset.
pub fn profile(dataset: &Dataset) -> DataProfile {
    let total_cells = dataset.total_rows() * dataset.total_columns();
    let total_missing: usize = dataset.columns().iter().map(|c| c.missing_count).sum();
    let completeness = if total_cells > 0 {
        (total_cells - total_missing) as f64 / total_cells as f64 * 100.0
    } else {
        0.0
    };

    let quality = QualityIssues {
        duplicates: count_duplicates(dataset.rows()),
        missing_values: total_missing,
        outliers: count_outliers(dataset.columns()),
        inconsistent_types: dataset
            .columns()
            .iter()
            .filter(|c| has_inconsistent_types(c))
            .count(),
        text_issues: dataset
            .columns()
            .iter()
            .filter(|c| c.column_type.is_label() && has_text_issues(c))
            .count(),
    };

    let columns = dataset
        .columns()
        .iter()
        .map(|c| ColumnProfile {
            name: c.name.clone(),
            column_type: c.column_type,
            unique_count: c.unique_count,
            missing_count: c.missing_count,
            completeness: c.completeness(),
        })
        .collect();

    DataProfile {
        overview: ProfileOverview {
            total_rows: dataset.total_rows(),
            total_columns: dataset.total_columns(),
            memory_usage: dataset.memory_usage(),
            completeness,
        },
        quality,
        columns,
    }
}

/// Canonical form of a row: JSON with keys sorted.
pub(crate) fn canonical_row(row: &Row) -> String {
    let sorted: BTreeMap<&str, &Value> = row.iter().map(|(k, v)| (k.as_str(), v)).collect();
    serde_json::to_string(&sorted).unwrap_or_default()
}

fn count_duplicates(rows: &[Row]) -> usize {
    let distinct: HashSet<String> = rows.iter().map(canonical_row).collect();
    rows.len() - distinct.len()
}

fn count_outliers(columns: &[Column]) -> usize {
    columns
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| detect_outliers(&c.numeric_values()).len())
        .sum()
}

fn has_inconsistent_types(column: &Column) -> bool {
    column.is_numeric() && column.present_values().any(|v| v.as_number().is_none())
}

/// Leading/trailing whitespace or a run of two or more whitespace characters
/// in any text value.
fn has_text_issues(column: &Column) -> bool {
    column
        .values
        .iter()
        .filter_map(Value::as_text)
        .any(|s| s.trim() != s || REPEATED_WHITESPACE.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::row;
    use crate::profile::analyze;

    #[test]
    fn test_profile_empty_dataset() {
        let p = profile(&analyze(Vec::new(), "empty"));
        assert_eq!(p.overview.completeness, 0.0);
        assert_eq!(p.quality, QualityIssues::default());
        assert!(p.columns.is_empty());
    }

    #[test]
    fn test_completeness_and_missing() {
        let rows = vec![
            row([("a", Value::from(1)), ("b", Value::Null)]),
            row([("a", Value::from(2)), ("b", Value::from("x"))]),
        ];
        let p = profile(&analyze(rows, "t"));

        assert_eq!(p.quality.missing_values, 1);
        assert_eq!(p.overview.completeness, 75.0);
        assert_eq!(p.columns[1].completeness, 50.0);
    }

    #[test]
    fn test_duplicates_ignore_key_order() {
        let rows = vec![
            row([("a", Value::from(1)), ("b", Value::from(2))]),
            row([("b", Value::from(2)), ("a", Value::from(1))]),
            row([("a", Value::from(1)), ("b", Value::from(3))]),
        ];
        let p = profile(&analyze(rows, "t"));
        assert_eq!(p.quality.duplicates, 1);
    }

    #[test]
    fn test_outliers_counted_on_numeric_columns() {
        let rows: Vec<Row> = [10, 11, 12, 11, 10, 12, 11, 500]
            .iter()
            .map(|&v| row([("v", Value::from(v))]))
            .collect();
        let p = profile(&analyze(rows, "t"));
        assert_eq!(p.quality.outliers, 1);
    }

    #[test]
    fn test_text_issues_flag_columns_once() {
        let rows = vec![
            row([("name", Value::from(" Alice")), ("city", Value::from("New  York"))]),
            row([("name", Value::from("Bob ")), ("city", Value::from("LA"))]),
            row([("name", Value::from("Carol")), ("city", Value::from("SF"))]),
        ];
        let p = profile(&analyze(rows, "t"));
        assert_eq!(p.quality.text_issues, 2);
    }

    #[test]
    fn test_inconsistent_types() {
        let mut rows: Vec<Row> = (0..9).map(|i| row([("n", Value::from(i))])).collect();
        rows.push(row([("n", Value::from("n/a"))]));
        let p = profile(&analyze(rows, "t"));
        assert_eq!(p.columns[0].column_type, ColumnType::Numeric);
        assert_eq!(p.quality.inconsistent_types, 1);
    }
}
