//! Column type detection.
//!
//! A column's type is decided by an ordered list of rules evaluated top-down;
//! the first rule whose predicate holds wins and later rules are never run.
//! Columns that match no rule (or have no present values) are text.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::Value;
use crate::schema::ColumnType;

/// Share of present values that must parse as numbers for a numeric column.
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;
/// Share of present values that must look like dates for a datetime column.
pub const DATE_RATIO_THRESHOLD: f64 = 0.6;
/// Distinct/present ratio below which a column may be categorical.
pub const CATEGORICAL_UNIQUE_RATIO: f64 = 0.1;
/// Distinct-value count below which a column may be categorical.
pub const CATEGORICAL_MAX_DISTINCT: usize = 20;

// Loose date shape, matched anywhere in the value.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,4}[-/]\d{1,2}[-/]\d{1,4}").unwrap());

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// The present (non-missing) values of one column.
struct ColumnSample<'a> {
    values: Vec<&'a Value>,
}

impl ColumnSample<'_> {
    fn ratio(&self, predicate: impl Fn(&Value) -> bool) -> f64 {
        let hits = self.values.iter().filter(|v| predicate(v)).count();
        hits as f64 / self.values.len() as f64
    }

    fn distinct_count(&self) -> usize {
        self.values
            .iter()
            .map(|v| v.distinct_key())
            .collect::<HashSet<_>>()
            .len()
    }
}

type Rule = (fn(&ColumnSample<'_>) -> bool, ColumnType);

/// Classification rules in priority order.
const RULES: &[Rule] = &[
    (is_numeric, ColumnType::Numeric),
    (is_datetime, ColumnType::Datetime),
    (is_categorical, ColumnType::Categorical),
];

fn is_numeric(sample: &ColumnSample<'_>) -> bool {
    sample.ratio(|v| v.as_number().is_some()) > NUMERIC_RATIO_THRESHOLD
}

fn is_datetime(sample: &ColumnSample<'_>) -> bool {
    sample.ratio(|v| looks_like_date(&v.to_display_string())) > DATE_RATIO_THRESHOLD
}

fn is_categorical(sample: &ColumnSample<'_>) -> bool {
    let distinct = sample.distinct_count();
    let unique_ratio = distinct as f64 / sample.values.len() as f64;
    unique_ratio < CATEGORICAL_UNIQUE_RATIO && distinct < CATEGORICAL_MAX_DISTINCT
}

/// Classify a column from its raw values.
pub fn detect_column_type(values: &[Value]) -> ColumnType {
    let sample = ColumnSample {
        values: values.iter().filter(|v| !v.is_missing()).collect(),
    };

    if sample.values.is_empty() {
        return ColumnType::Text;
    }

    RULES
        .iter()
        .find(|(predicate, _)| predicate(&sample))
        .map(|&(_, verdict)| verdict)
        .unwrap_or(ColumnType::Text)
}

/// Whether a value reads as a date: an ISO-8601 parse (with `/` normalized
/// to `-`) or the loose `D{1,4}[-/]D{1,2}[-/]D{1,4}` shape.
pub fn looks_like_date(value: &str) -> bool {
    parses_as_iso(&value.replace('/', "-")) || DATE_PATTERN.is_match(value)
}

fn parses_as_iso(value: &str) -> bool {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || ISO_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    #[test]
    fn test_mixed_numeric_is_numeric() {
        let values = vec![
            Value::from(1),
            Value::from(2),
            Value::from(3),
            Value::from(4),
            Value::from(5),
            Value::from("6"),
            Value::from("7.5"),
        ];
        assert_eq!(detect_column_type(&values), ColumnType::Numeric);
    }

    #[test]
    fn test_unique_ratio_boundary_is_text() {
        // 2 distinct / 10 present = 0.2, not below 0.1.
        let values = texts(&["a", "a", "a", "a", "a", "a", "a", "a", "a", "b"]);
        assert_eq!(detect_column_type(&values), ColumnType::Text);
    }

    #[test]
    fn test_low_cardinality_is_categorical() {
        let mut raw = vec!["red"; 15];
        raw.extend(vec!["blue"; 15]);
        let values = texts(&raw);
        assert_eq!(detect_column_type(&values), ColumnType::Categorical);
    }

    #[test]
    fn test_all_missing_is_text() {
        let values = vec![Value::Null, Value::from(""), Value::Null];
        assert_eq!(detect_column_type(&values), ColumnType::Text);
        assert_eq!(detect_column_type(&[]), ColumnType::Text);
    }

    #[test]
    fn test_numeric_threshold_is_strict() {
        // Exactly 80% numeric does not qualify.
        let values = texts(&["1", "2", "3", "4", "x"]);
        assert_ne!(detect_column_type(&values), ColumnType::Numeric);
    }

    #[test]
    fn test_infinities_are_not_numeric() {
        let values = texts(&["inf", "-inf", "NaN", "1"]);
        assert_eq!(detect_column_type(&values), ColumnType::Text);
    }

    #[test]
    fn test_dates() {
        let values = texts(&["2023-01-15", "2023/02/20", "03/14/2023", "2023-04-01T10:30:00"]);
        assert_eq!(detect_column_type(&values), ColumnType::Datetime);
    }

    #[test]
    fn test_date_threshold_is_strict() {
        // Exactly 60% dates does not qualify.
        let values = texts(&["2023-01-15", "2023-02-15", "2023-03-15", "pending", "unknown"]);
        assert_eq!(detect_column_type(&values), ColumnType::Text);
    }

    fn labels(distinct: usize, total: usize) -> Vec<Value> {
        (0..total)
            .map(|i| Value::from(format!("label_{}", i % distinct)))
            .collect()
    }

    #[test]
    fn test_categorical_distinct_cap() {
        // Both have a unique ratio under 0.1; only fewer than 20 labels qualify.
        assert_eq!(detect_column_type(&labels(20, 400)), ColumnType::Text);
        assert_eq!(detect_column_type(&labels(19, 400)), ColumnType::Categorical);
    }

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("2024-02-29"));
        assert!(looks_like_date("2024/02/29"));
        assert!(looks_like_date("1/2/99"));
        assert!(looks_like_date("2024-01-01T08:00:00Z"));
        assert!(!looks_like_date("hello"));
        assert!(!looks_like_date("12345"));
    }

    #[test]
    fn test_missing_values_are_ignored() {
        let values = vec![
            Value::from("1"),
            Value::from(""),
            Value::Null,
            Value::from("2"),
            Value::from("3"),
        ];
        assert_eq!(detect_column_type(&values), ColumnType::Numeric);
    }
}
