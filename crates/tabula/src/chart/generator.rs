//! Chart-ready aggregates over a dataset.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, TabulaError};
use crate::input::Value;
use crate::schema::{Column, ColumnType, Dataset};

use super::{ChartConfig, ChartType};

/// Rows scanned for point charts when the caller gives no limit.
pub const DEFAULT_POINT_LIMIT: usize = 100;
/// Maximum number of chart recommendations.
pub const MAX_RECOMMENDATIONS: usize = 5;

const PIE_MIN_CATEGORIES: usize = 2;
const PIE_MAX_CATEGORIES: usize = 10;

/// A point of a bar, line or scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: Value,
    pub y: f64,
}

/// A pie slice: a category and how many rows hold it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: usize,
}

/// Data for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    Points(Vec<ChartPoint>),
    Slices(Vec<PieSlice>),
}

impl ChartData {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Points(points) => points.len(),
            ChartData::Slices(slices) => slices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A suggested chart for the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecommendation {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub x_column: String,
    pub y_column: Option<String>,
    pub description: String,
}

impl ChartRecommendation {
    pub fn config(&self) -> ChartConfig {
        ChartConfig::new(self.chart_type, self.x_column.clone(), self.y_column.clone())
    }
}

/// Builds chart data from a dataset.
#[derive(Debug, Clone, Copy)]
pub struct ChartDataGenerator<'a> {
    dataset: &'a Dataset,
}

impl<'a> ChartDataGenerator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Points from the first `limit` rows with a non-null x and a numeric y.
    pub fn bar_data(&self, x: &str, y: &str, limit: usize) -> Result<Vec<ChartPoint>> {
        self.dataset.require_column(x)?;
        self.dataset.require_column(y)?;

        Ok(self
            .dataset
            .rows()
            .iter()
            .take(limit)
            .filter_map(|row| {
                let x_value = Dataset::cell(row, x);
                if x_value.is_null() {
                    return None;
                }
                let y_value = Dataset::cell(row, y).as_number()?;
                Some(ChartPoint {
                    x: x_value.clone(),
                    y: y_value,
                })
            })
            .collect())
    }

    /// Same points as [`bar_data`](Self::bar_data).
    pub fn line_data(&self, x: &str, y: &str, limit: usize) -> Result<Vec<ChartPoint>> {
        self.bar_data(x, y, limit)
    }

    /// Points from the first `limit` rows where both coordinates are numeric.
    pub fn scatter_data(&self, x: &str, y: &str, limit: usize) -> Result<Vec<ChartPoint>> {
        self.dataset.require_column(x)?;
        self.dataset.require_column(y)?;

        Ok(self
            .dataset
            .rows()
            .iter()
            .take(limit)
            .filter_map(|row| {
                let x_value = Dataset::cell(row, x).as_number()?;
                let y_value = Dataset::cell(row, y).as_number()?;
                Some(ChartPoint {
                    x: Value::Number(x_value),
                    y: y_value,
                })
            })
            .collect())
    }

    /// Counts of each present value, most frequent first; ties keep the
    /// order values were first seen.
    pub fn pie_data(&self, column: &str) -> Result<Vec<PieSlice>> {
        self.dataset.require_column(column)?;

        let mut counts: IndexMap<String, PieSlice> = IndexMap::new();
        for value in self.dataset.rows().iter().map(|row| Dataset::cell(row, column)) {
            if value.is_missing() {
                continue;
            }
            counts
                .entry(value.distinct_key())
                .or_insert_with(|| PieSlice {
                    name: value.to_display_string(),
                    value: 0,
                })
                .value += 1;
        }

        let mut slices: Vec<PieSlice> = counts.into_values().collect();
        slices.sort_by(|a, b| b.value.cmp(&a.value));
        Ok(slices)
    }

    /// Check a chart configuration against the dataset.
    pub fn validate(&self, config: &ChartConfig) -> Result<()> {
        let x = self.dataset.require_column(&config.x_column)?;

        if config.chart_type.needs_y() {
            let y_name = config.y_column.as_deref().ok_or_else(|| {
                TabulaError::InvalidArgument(format!(
                    "a y column is required for {} charts",
                    config.chart_type
                ))
            })?;
            let y = self.dataset.require_column(y_name)?;
            if !y.is_numeric() {
                return Err(TabulaError::InvalidArgument(format!(
                    "column '{}' must be numeric for {} charts",
                    y.name, config.chart_type
                )));
            }
        }

        match config.chart_type {
            ChartType::Pie if !x.column_type.is_label() => Err(TabulaError::InvalidArgument(
                format!("column '{}' should be categorical for pie charts", x.name),
            )),
            ChartType::Scatter if !x.is_numeric() => Err(TabulaError::InvalidArgument(format!(
                "column '{}' must be numeric for scatter plots",
                x.name
            ))),
            _ => Ok(()),
        }
    }

    /// Validate a configuration and build its data.
    pub fn chart_data(&self, config: &ChartConfig, limit: usize) -> Result<ChartData> {
        self.validate(config)?;

        let x = config.x_column.as_str();
        let y = config.y_column.as_deref().unwrap_or_default();
        Ok(match config.chart_type {
            ChartType::Bar => ChartData::Points(self.bar_data(x, y, limit)?),
            ChartType::Line => ChartData::Points(self.line_data(x, y, limit)?),
            ChartType::Scatter => ChartData::Points(self.scatter_data(x, y, limit)?),
            ChartType::Pie => ChartData::Slices(self.pie_data(x)?),
        })
    }

    /// Up to [`MAX_RECOMMENDATIONS`] charts suited to the column types.
    ///
    /// Bar charts pair the first two label columns with the first two numeric
    /// columns, then one scatter plot for the first numeric pair, then one pie
    /// chart for the first label column with 2 to 10 distinct values.
    pub fn recommended_charts(&self) -> Vec<ChartRecommendation> {
        let numeric: Vec<&Column> = self
            .dataset
            .columns()
            .iter()
            .filter(|c| c.column_type == ColumnType::Numeric)
            .collect();
        let labels: Vec<&Column> = self
            .dataset
            .columns()
            .iter()
            .filter(|c| c.column_type.is_label())
            .collect();

        let mut recommendations = Vec::new();

        for cat in labels.iter().take(2) {
            for num in numeric.iter().take(2) {
                recommendations.push(ChartRecommendation {
                    chart_type: ChartType::Bar,
                    title: format!("{} by {}", num.name, cat.name),
                    x_column: cat.name.clone(),
                    y_column: Some(num.name.clone()),
                    description: format!(
                        "Bar chart showing {} values grouped by {}",
                        num.name, cat.name
                    ),
                });
            }
        }

        if let [first, second, ..] = numeric.as_slice() {
            recommendations.push(ChartRecommendation {
                chart_type: ChartType::Scatter,
                title: format!("{} vs {}", first.name, second.name),
                x_column: first.name.clone(),
                y_column: Some(second.name.clone()),
                description: format!(
                    "Scatter plot showing relationship between {} and {}",
                    first.name, second.name
                ),
            });
        }

        if let Some(cat) = labels
            .iter()
            .find(|c| (PIE_MIN_CATEGORIES..=PIE_MAX_CATEGORIES).contains(&c.unique_count))
        {
            recommendations.push(ChartRecommendation {
                chart_type: ChartType::Pie,
                title: format!("Distribution of {}", cat.name),
                x_column: cat.name.clone(),
                y_column: None,
                description: format!("Pie chart showing the distribution of {} values", cat.name),
            });
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}
