//! Core type definitions for column and pipeline configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TabulaError;

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Mostly finite numbers.
    Numeric,
    /// Few distinct values relative to the row count.
    Categorical,
    /// Dates or date-times.
    Datetime,
    /// Anything else, including all-missing columns.
    Text,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Datetime => "datetime",
            ColumnType::Text => "text",
        }
    }

    /// Returns true for types holding string labels (categorical or text).
    pub fn is_label(&self) -> bool {
        matches!(self, ColumnType::Categorical | ColumnType::Text)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied by a filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    Greater,
    Less,
}

impl FromStr for FilterOperator {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equals" | "eq" | "=" | "==" => Ok(FilterOperator::Equals),
            "not_equals" | "ne" | "!=" => Ok(FilterOperator::NotEquals),
            "contains" => Ok(FilterOperator::Contains),
            "greater" | "gt" | ">" => Ok(FilterOperator::Greater),
            "less" | "lt" | "<" => Ok(FilterOperator::Less),
            _ => Err(TabulaError::InvalidArgument(format!(
                "Unknown filter operator: {}. Use equals, not_equals, contains, greater or less.",
                s
            ))),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::Greater => "greater",
            FilterOperator::Less => "less",
        };
        f.write_str(name)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(TabulaError::InvalidArgument(format!(
                "Unknown sort direction: {}. Use asc or desc.",
                s
            ))),
        }
    }
}

/// A single column filter.
///
/// Comparison is case-insensitive against the stringified cell value;
/// `greater`/`less` compare numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    pub column: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterRule {
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// Rules with an empty column or value are kept but never applied.
    pub fn is_active(&self) -> bool {
        !self.column.is_empty() && !self.value.is_empty()
    }
}

impl FromStr for FilterRule {
    type Err = TabulaError;

    /// Parse `column:operator:value`. The value may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(column), Some(op), Some(value)) => {
                Ok(FilterRule::new(column, op.parse()?, value))
            }
            _ => Err(TabulaError::InvalidArgument(format!(
                "Filter rule must look like column:operator:value, got '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse() {
        assert_eq!("equals".parse::<FilterOperator>().unwrap(), FilterOperator::Equals);
        assert_eq!("NOT_EQUALS".parse::<FilterOperator>().unwrap(), FilterOperator::NotEquals);
        assert_eq!(">".parse::<FilterOperator>().unwrap(), FilterOperator::Greater);
        assert!(matches!(
            "between".parse::<FilterOperator>(),
            Err(TabulaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rule_parse() {
        let rule: FilterRule = "time:equals:10:30".parse().unwrap();
        assert_eq!(rule.column, "time");
        assert_eq!(rule.operator, FilterOperator::Equals);
        assert_eq!(rule.value, "10:30");
        assert!("age>3".parse::<FilterRule>().is_err());
    }

    #[test]
    fn test_rule_activity() {
        assert!(FilterRule::new("a", FilterOperator::Equals, "x").is_active());
        assert!(!FilterRule::new("", FilterOperator::Equals, "x").is_active());
        assert!(!FilterRule::new("a", FilterOperator::Equals, "").is_active());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ColumnType::Categorical).unwrap();
        assert_eq!(json, "\"categorical\"");
        let op: FilterOperator = serde_json::from_str("\"not_equals\"").unwrap();
        assert_eq!(op, FilterOperator::NotEquals);
    }
}
