//! Row cleaning operations.
//!
//! Every operation takes rows by reference and returns new rows; the input is
//! never modified.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabulaError};
use crate::inference::{mean, outlier_bounds};
use crate::input::{Row, Value};
use crate::profile::canonical_row;
use crate::schema::Dataset;

/// How to treat missing cells in a column.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingValueStrategy {
    /// Drop rows whose cell is missing.
    Remove,
    /// Replace missing cells with a fixed value.
    Fill(Value),
    /// Replace missing cells with the mean of the parseable values.
    Mean,
    /// Replace missing cells with the most frequent present value.
    Mode,
}

impl MissingValueStrategy {
    /// Build a strategy from its name, taking the fill value for `fill`.
    pub fn from_name(name: &str, fill: Option<Value>) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "remove" | "drop" => Ok(Self::Remove),
            "fill" => fill.map(Self::Fill).ok_or_else(|| {
                TabulaError::InvalidArgument("strategy 'fill' needs a fill value".to_string())
            }),
            "mean" => Ok(Self::Mean),
            "mode" => Ok(Self::Mode),
            other => Err(TabulaError::InvalidArgument(format!(
                "unknown missing value strategy '{}' (expected remove, fill, mean or mode)",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Fill(_) => "fill",
            Self::Mean => "mean",
            Self::Mode => "mode",
        }
    }
}

/// Parses the value-free strategies; `fill` needs [`MissingValueStrategy::from_name`].
impl FromStr for MissingValueStrategy {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s, None)
    }
}

impl fmt::Display for MissingValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cleaning step that can be applied to a set of rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CleaningOperation {
    RemoveDuplicates,
    HandleMissing {
        column: String,
        strategy: MissingValueStrategy,
    },
    StandardizeText {
        column: String,
    },
    RemoveOutliers {
        column: String,
    },
}

impl CleaningOperation {
    /// Build an operation from its name.
    ///
    /// Every operation except `remove_duplicates` needs a column; `strategy`
    /// is only read by `handle_missing`.
    pub fn from_name(
        name: &str,
        column: Option<String>,
        strategy: MissingValueStrategy,
    ) -> Result<Self> {
        let name = name.trim().to_lowercase().replace('-', "_");
        if matches!(name.as_str(), "remove_duplicates" | "dedupe" | "duplicates") {
            return Ok(Self::RemoveDuplicates);
        }

        let column = column.filter(|c| !c.is_empty()).ok_or_else(|| {
            TabulaError::InvalidArgument(format!("operation '{}' needs a column", name))
        })?;

        match name.as_str() {
            "handle_missing" | "missing" => Ok(Self::HandleMissing { column, strategy }),
            "standardize_text" | "standardize" => Ok(Self::StandardizeText { column }),
            "remove_outliers" | "outliers" => Ok(Self::RemoveOutliers { column }),
            other => Err(TabulaError::InvalidArgument(format!(
                "unknown cleaning operation '{}'",
                other
            ))),
        }
    }

    /// The column this operation targets, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::RemoveDuplicates => None,
            Self::HandleMissing { column, .. }
            | Self::StandardizeText { column }
            | Self::RemoveOutliers { column } => Some(column),
        }
    }

    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            Self::RemoveDuplicates => "Remove duplicate rows".to_string(),
            Self::HandleMissing { column, strategy } => {
                format!("Handle missing values in '{}' ({})", column, strategy)
            }
            Self::StandardizeText { column } => format!("Standardize text in '{}'", column),
            Self::RemoveOutliers { column } => format!("Remove outliers in '{}'", column),
        }
    }

    /// Check the target column against a dataset.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        match self.column() {
            Some(column) => dataset.require_column(column).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Apply the operation, returning the new rows and a summary.
    pub fn apply(&self, rows: &[Row]) -> CleaningResult {
        let cleaned = match self {
            Self::RemoveDuplicates => remove_duplicates(rows),
            Self::HandleMissing { column, strategy } => {
                handle_missing_values(rows, column, strategy)
            }
            Self::StandardizeText { column } => standardize_text(rows, column),
            Self::RemoveOutliers { column } => remove_outliers(rows, column),
        };

        let cells_changed = if cleaned.len() == rows.len() {
            rows.iter()
                .zip(&cleaned)
                .map(|(before, after)| {
                    after
                        .iter()
                        .filter(|&(k, v)| before.get(k.as_str()) != Some(v))
                        .count()
                })
                .sum()
        } else {
            0
        };

        log::debug!(
            "{}: {} -> {} rows, {} cells changed",
            self.description(),
            rows.len(),
            cleaned.len(),
            cells_changed
        );

        CleaningResult {
            description: self.description(),
            rows_before: rows.len(),
            rows_after: cleaned.len(),
            cells_changed,
            rows: cleaned,
        }
    }
}

/// Outcome of a cleaning operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningResult {
    pub description: String,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Cells whose value changed; only counted when no rows were dropped.
    pub cells_changed: usize,
    pub rows: Vec<Row>,
}

impl CleaningResult {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Keep the first occurrence of every row, comparing rows independent of
/// key order.
pub fn remove_duplicates(rows: &[Row]) -> Vec<Row> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(canonical_row(row)))
        .cloned()
        .collect()
}

/// Remove or fill the missing cells of `column`.
pub fn handle_missing_values(
    rows: &[Row],
    column: &str,
    strategy: &MissingValueStrategy,
) -> Vec<Row> {
    let fill = match strategy {
        MissingValueStrategy::Remove => {
            return rows
                .iter()
                .filter(|row| !Dataset::cell(row, column).is_missing())
                .cloned()
                .collect();
        }
        MissingValueStrategy::Fill(value) => Some(value.clone()),
        MissingValueStrategy::Mean => {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|row| Dataset::cell(row, column).as_number())
                .collect();
            mean(&values).map(Value::Number)
        }
        MissingValueStrategy::Mode => mode(rows, column),
    };

    let Some(fill) = fill else {
        return rows.to_vec();
    };

    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            if Dataset::cell(&row, column).is_missing() {
                row.insert(column.to_string(), fill.clone());
            }
            row
        })
        .collect()
}

/// Most frequent present value; the first one seen wins a tie.
fn mode(rows: &[Row], column: &str) -> Option<Value> {
    let mut counts: IndexMap<String, (usize, &Value)> = IndexMap::new();
    for value in rows.iter().map(|row| Dataset::cell(row, column)) {
        if value.is_missing() {
            continue;
        }
        counts.entry(value.distinct_key()).or_insert((0, value)).0 += 1;
    }

    let mut best: Option<(usize, &Value)> = None;
    for &(count, value) in counts.values() {
        if best.is_none_or(|(top, _)| count > top) {
            best = Some((count, value));
        }
    }
    best.map(|(_, value)| value.clone())
}

/// Trim, collapse whitespace runs and lowercase the text cells of `column`.
pub fn standardize_text(rows: &[Row], column: &str) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            let mut row = row.clone();
            if let Some(Value::Text(text)) = row.get_mut(column) {
                *text = text
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase();
            }
            row
        })
        .collect()
}

/// Drop rows whose numeric cell lies outside the IQR fences of the column.
/// Rows with a missing or unparseable cell are kept.
pub fn remove_outliers(rows: &[Row], column: &str) -> Vec<Row> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|row| Dataset::cell(row, column).as_number())
        .collect();

    let Some((lower, upper)) = outlier_bounds(&values) else {
        return rows.to_vec();
    };

    rows.iter()
        .filter(|row| match Dataset::cell(row, column).as_number() {
            Some(v) => v >= lower && v <= upper,
            None => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::row;

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let rows = vec![
            row([("a", Value::from(1)), ("b", Value::from(2))]),
            row([("a", Value::from(1)), ("b", Value::from(2))]),
            row([("a", Value::from(1)), ("b", Value::from(3))]),
        ];
        let deduped = remove_duplicates(&rows);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[1]["b"], Value::from(3));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_missing_remove_keeps_falsy_values() {
        let rows = vec![
            row([("v", Value::from(0))]),
            row([("v", Value::Bool(false))]),
            row([("v", Value::Null)]),
            row([("v", Value::from(""))]),
            row([("other", Value::from(1))]),
        ];
        let kept = handle_missing_values(&rows, "v", &MissingValueStrategy::Remove);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_missing_fill_and_mean() {
        let rows = vec![
            row([("v", Value::from(2))]),
            row([("v", Value::Null)]),
            row([("v", Value::from("4"))]),
        ];

        let filled = handle_missing_values(&rows, "v", &MissingValueStrategy::Fill(Value::from(0)));
        assert_eq!(filled[1]["v"], Value::from(0));

        let meaned = handle_missing_values(&rows, "v", &MissingValueStrategy::Mean);
        assert_eq!(meaned[1]["v"], Value::Number(3.0));
        assert_eq!(meaned[2]["v"], Value::from("4"));
    }

    #[test]
    fn test_mean_without_numbers_is_noop() {
        let rows = vec![row([("v", Value::from("x"))]), row([("v", Value::Null)])];
        let out = handle_missing_values(&rows, "v", &MissingValueStrategy::Mean);
        assert_eq!(out, rows);
    }

    #[test]
    fn test_mode_first_seen_wins_ties() {
        let rows = vec![
            row([("c", Value::from("b"))]),
            row([("c", Value::from("a"))]),
            row([("c", Value::from("a"))]),
            row([("c", Value::from("b"))]),
            row([("c", Value::from(""))]),
        ];
        let out = handle_missing_values(&rows, "c", &MissingValueStrategy::Mode);
        assert_eq!(out[4]["c"], Value::from("b"));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("MEAN".parse::<MissingValueStrategy>().unwrap(), MissingValueStrategy::Mean);
        assert!("fill".parse::<MissingValueStrategy>().is_err());
        assert!(matches!(
            "median".parse::<MissingValueStrategy>(),
            Err(TabulaError::InvalidArgument(_))
        ));
        assert_eq!(
            MissingValueStrategy::from_name("fill", Some(Value::from("n/a"))).unwrap(),
            MissingValueStrategy::Fill(Value::from("n/a"))
        );
    }

    #[test]
    fn test_standardize_text() {
        let rows = vec![
            row([("c", Value::from("  New   York "))]),
            row([("c", Value::from(12))]),
        ];
        let out = standardize_text(&rows, "c");
        assert_eq!(out[0]["c"], Value::from("new york"));
        assert_eq!(out[1]["c"], Value::from(12));
    }

    #[test]
    fn test_remove_outliers_keeps_unparseable() {
        let mut rows: Vec<Row> = [10, 11, 12, 11, 10, 12, 11, 500]
            .iter()
            .map(|&v| row([("v", Value::from(v))]))
            .collect();
        rows.push(row([("v", Value::from("n/a"))]));

        let out = remove_outliers(&rows, "v");
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|r| r["v"] != Value::from(500)));
    }

    #[test]
    fn test_operation_from_name() {
        assert_eq!(
            CleaningOperation::from_name("dedupe", None, MissingValueStrategy::Remove).unwrap(),
            CleaningOperation::RemoveDuplicates
        );
        assert_eq!(
            CleaningOperation::from_name("handle-missing", Some("a".into()), MissingValueStrategy::Mean)
                .unwrap()
                .column(),
            Some("a")
        );
        assert!(CleaningOperation::from_name("outliers", None, MissingValueStrategy::Remove).is_err());
        assert!(
            CleaningOperation::from_name("shuffle", Some("a".into()), MissingValueStrategy::Remove)
                .is_err()
        );
    }

    #[test]
    fn test_apply_reports_changes() {
        let rows = vec![
            row([("c", Value::from(" A"))]),
            row([("c", Value::from("b"))]),
        ];
        let op = CleaningOperation::StandardizeText {
            column: "c".to_string(),
        };
        let result = op.apply(&rows);
        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.rows_removed(), 0);
        assert_eq!(result.description, "Standardize text in 'c'");

        let dedupe = CleaningOperation::RemoveDuplicates.apply(&[rows[0].clone(), rows[0].clone()]);
        assert_eq!(dedupe.rows_removed(), 1);
    }
}
