//! Insight types.

use serde::Serialize;

use crate::input::Value;

/// Category of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Correlation,
    Distribution,
    Anomaly,
    Pattern,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Correlation => "correlation",
            InsightType::Distribution => "distribution",
            InsightType::Anomaly => "anomaly",
            InsightType::Pattern => "pattern",
        }
    }
}

/// Per-type payload of an insight.
///
/// Serialized adjacently as `"type": ..., "data": {...}` next to the shared
/// insight fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InsightKind {
    /// Strong linear association between two numeric columns.
    Correlation {
        correlation: f64,
        /// Leading jointly-valid `(x, y)` pairs.
        pairs: Vec<(f64, f64)>,
    },
    /// Skewed numeric distribution.
    Distribution { skewness: f64, mean: f64, std: f64 },
    /// IQR outliers in a numeric column.
    Anomaly {
        /// Leading outlier values, in row order.
        outliers: Vec<f64>,
        count: usize,
    },
    /// One category holding the majority of a column.
    Pattern { category: Value, percentage: f64 },
}

impl InsightKind {
    pub fn insight_type(&self) -> InsightType {
        match self {
            InsightKind::Correlation { .. } => InsightType::Correlation,
            InsightKind::Distribution { .. } => InsightType::Distribution,
            InsightKind::Anomaly { .. } => InsightType::Anomaly,
            InsightKind::Pattern { .. } => InsightType::Pattern,
        }
    }
}

/// A finding about the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    /// Confidence score in `[0, 100]`.
    pub confidence: f64,
    /// Columns the finding is about.
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub kind: InsightKind,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: f64,
        columns: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            confidence: confidence.clamp(0.0, 100.0),
            columns,
            kind,
        }
    }

    pub fn insight_type(&self) -> InsightType {
        self.kind.insight_type()
    }
}
