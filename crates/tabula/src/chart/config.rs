//! Chart kinds and configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabulaError};

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Scatter,
    Pie,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
        }
    }

    /// Whether the chart plots a numeric y column.
    pub fn needs_y(&self) -> bool {
        !matches!(self, ChartType::Pie)
    }
}

impl FromStr for ChartType {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "scatter" => Ok(ChartType::Scatter),
            "pie" => Ok(ChartType::Pie),
            other => Err(TabulaError::InvalidArgument(format!(
                "unknown chart type '{}' (expected bar, line, scatter or pie)",
                other
            ))),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which chart to draw from which columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub x_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_column: Option<String>,
}

impl ChartConfig {
    pub fn new(chart_type: ChartType, x_column: impl Into<String>, y_column: Option<String>) -> Self {
        Self {
            chart_type,
            x_column: x_column.into(),
            y_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_parsing() {
        assert_eq!("Bar".parse::<ChartType>().unwrap(), ChartType::Bar);
        assert_eq!(" pie ".parse::<ChartType>().unwrap(), ChartType::Pie);
        assert!(matches!(
            "radar".parse::<ChartType>(),
            Err(TabulaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_config_wire_names() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"type":"scatter","xColumn":"a","yColumn":"b"}"#).unwrap();
        assert_eq!(config.chart_type, ChartType::Scatter);
        assert_eq!(config.y_column.as_deref(), Some("b"));

        let pie: ChartConfig = serde_json::from_str(r#"{"type":"pie","xColumn":"a"}"#).unwrap();
        assert!(pie.y_column.is_none());
    }
}
