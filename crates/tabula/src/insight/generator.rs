//! Rule-based insight generation.
//!
//! Four independent generators each scan the dataset and emit findings with
//! a confidence score. The combined list is ranked by confidence.

use indexmap::IndexMap;

use crate::inference::{correlation, detect_outliers, mean, skewness, std_dev};
use crate::input::Value;
use crate::schema::{Column, ColumnType, Dataset};

use super::{Insight, InsightKind};

/// Maximum number of insights returned by [`InsightEngine::generate_insights`].
pub const MAX_INSIGHTS: usize = 10;
/// Minimum `|r|` for a correlation insight (exclusive).
pub const CORRELATION_THRESHOLD: f64 = 0.7;
/// Jointly-valid rows needed before a pair of columns is correlated.
pub const MIN_CORRELATION_PAIRS: usize = 10;
/// Minimum `|skewness|` for a distribution insight (exclusive).
pub const SKEW_THRESHOLD: f64 = 1.0;
/// Minimum share (percent) of the top category for a pattern insight (exclusive).
pub const DOMINANT_CATEGORY_PERCENT: f64 = 50.0;

/// Confidence ceiling for skew and anomaly insights.
const MAX_HEURISTIC_CONFIDENCE: f64 = 95.0;
const MAX_CORRELATION_PAIRS: usize = 100;
const MAX_OUTLIER_SAMPLES: usize = 10;

/// Read-only analytics over a dataset.
#[derive(Debug, Clone, Copy)]
pub struct InsightEngine<'a> {
    pub(super) dataset: &'a Dataset,
}

impl<'a> InsightEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Top [`MAX_INSIGHTS`] insights, most confident first.
    pub fn generate_insights(&self) -> Vec<Insight> {
        self.generate_insights_with_limit(MAX_INSIGHTS)
    }

    /// Top `limit` insights, most confident first. Ties keep generator order.
    pub fn generate_insights_with_limit(&self, limit: usize) -> Vec<Insight> {
        let mut insights = self.correlation_insights();
        insights.extend(self.distribution_insights());
        insights.extend(self.anomaly_insights());
        insights.extend(self.pattern_insights());

        log::debug!(
            "generated {} insights for '{}'",
            insights.len(),
            self.dataset.name()
        );

        insights.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        insights.truncate(limit);
        insights
    }

    fn numeric_columns(&self) -> impl Iterator<Item = &'a Column> {
        self.dataset.columns().iter().filter(|c| c.is_numeric())
    }

    /// Strong correlations between unordered pairs of numeric columns.
    pub fn correlation_insights(&self) -> Vec<Insight> {
        let numeric: Vec<&Column> = self.numeric_columns().collect();
        let mut insights = Vec::new();

        for (i, first) in numeric.iter().enumerate() {
            for second in &numeric[i + 1..] {
                let pairs = self.dataset.numeric_pairs(&first.name, &second.name);
                if pairs.len() < MIN_CORRELATION_PAIRS {
                    continue;
                }

                let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
                let r = correlation(&x, &y);
                if r.abs() <= CORRELATION_THRESHOLD {
                    continue;
                }

                let sign = if r > 0.0 { "Positive" } else { "Negative" };
                insights.push(Insight::new(
                    InsightKind::Correlation {
                        correlation: r,
                        pairs: pairs.into_iter().take(MAX_CORRELATION_PAIRS).collect(),
                    },
                    format!("Strong {} Correlation", sign),
                    format!(
                        "{} and {} show a {} correlation of {:.3}",
                        first.name,
                        second.name,
                        sign.to_lowercase(),
                        r
                    ),
                    r.abs() * 100.0,
                    vec![first.name.clone(), second.name.clone()],
                ));
            }
        }

        insights
    }

    /// Numeric columns with a markedly skewed distribution.
    pub fn distribution_insights(&self) -> Vec<Insight> {
        self.numeric_columns()
            .filter_map(|column| {
                let values = column.numeric_values();
                let skew = skewness(&values)?;
                if skew.abs() <= SKEW_THRESHOLD {
                    return None;
                }

                let side = if skew > 0.0 { "right" } else { "left" };
                Some(Insight::new(
                    InsightKind::Distribution {
                        skewness: skew,
                        mean: mean(&values)?,
                        std: std_dev(&values)?,
                    },
                    format!("{} Distribution Skew", column.name),
                    format!("{} shows {} skewness ({:.2})", column.name, side, skew),
                    (skew.abs() * 30.0).min(MAX_HEURISTIC_CONFIDENCE),
                    vec![column.name.clone()],
                ))
            })
            .collect()
    }

    /// Numeric columns containing IQR outliers.
    pub fn anomaly_insights(&self) -> Vec<Insight> {
        self.numeric_columns()
            .filter_map(|column| {
                let values = column.numeric_values();
                let outliers = detect_outliers(&values);
                if outliers.is_empty() {
                    return None;
                }

                let percent = outliers.len() as f64 / values.len() as f64 * 100.0;
                let count = outliers.len();
                Some(Insight::new(
                    InsightKind::Anomaly {
                        outliers: outliers.into_iter().take(MAX_OUTLIER_SAMPLES).collect(),
                        count,
                    },
                    format!("Outliers Detected in {}", column.name),
                    format!("Found {} outliers ({:.1}% of data)", count, percent),
                    (percent * 2.0).min(MAX_HEURISTIC_CONFIDENCE),
                    vec![column.name.clone()],
                ))
            })
            .collect()
    }

    /// Categorical columns dominated by a single value.
    pub fn pattern_insights(&self) -> Vec<Insight> {
        self.dataset
            .columns()
            .iter()
            .filter(|c| c.column_type == ColumnType::Categorical)
            .filter_map(|column| {
                let (category, count, total) = most_common(column)?;
                let percent = count as f64 / total as f64 * 100.0;
                if percent <= DOMINANT_CATEGORY_PERCENT {
                    return None;
                }

                Some(Insight::new(
                    InsightKind::Pattern {
                        category: category.clone(),
                        percentage: percent,
                    },
                    format!("Dominant Category in {}", column.name),
                    format!("\"{}\" represents {:.1}% of all values", category, percent),
                    percent,
                    vec![column.name.clone()],
                ))
            })
            .collect()
    }
}

/// Most frequent present value with its count and the present total.
/// The first value seen wins a tie.
fn most_common(column: &Column) -> Option<(&Value, usize, usize)> {
    let mut counts: IndexMap<String, (&Value, usize)> = IndexMap::new();
    for value in column.present_values() {
        counts.entry(value.distinct_key()).or_insert((value, 0)).1 += 1;
    }

    let total: usize = counts.values().map(|(_, n)| n).sum();
    let mut best: Option<(&Value, usize)> = None;
    for &(value, count) in counts.values() {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, count)| (value, count, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Row, row};
    use crate::insight::InsightType;
    use crate::profile::analyze;

    fn linear_rows(n: i32) -> Vec<Row> {
        (0..n)
            .map(|i| {
                row([
                    ("x", Value::from(i)),
                    ("y", Value::from(2 * i + 1)),
                    ("z", Value::from(100 - i)),
                ])
            })
            .collect()
    }

    #[test]
    fn test_correlation_insights() {
        let dataset = analyze(linear_rows(12), "t");
        let insights = InsightEngine::new(&dataset).correlation_insights();

        assert_eq!(insights.len(), 3);
        let xy = &insights[0];
        assert_eq!(xy.columns, vec!["x", "y"]);
        assert_eq!(xy.title, "Strong Positive Correlation");
        assert!((xy.confidence - 100.0).abs() < 1e-9);

        let xz = &insights[1];
        assert_eq!(xz.title, "Strong Negative Correlation");
        assert!(xz.description.contains("negative correlation of -1.000"));
    }

    #[test]
    fn test_correlation_needs_enough_pairs() {
        let dataset = analyze(linear_rows(9), "t");
        assert!(InsightEngine::new(&dataset).correlation_insights().is_empty());

        let dataset = analyze(linear_rows(10), "t");
        assert_eq!(InsightEngine::new(&dataset).correlation_insights().len(), 3);
    }

    #[test]
    fn test_anomaly_and_distribution() {
        let rows: Vec<Row> = [10, 11, 12, 11, 10, 12, 11, 500]
            .iter()
            .map(|&v| row([("v", Value::from(v))]))
            .collect();
        let dataset = analyze(rows, "t");
        let engine = InsightEngine::new(&dataset);

        let anomalies = engine.anomaly_insights();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].confidence, 25.0);
        assert_eq!(
            anomalies[0].kind,
            InsightKind::Anomaly {
                outliers: vec![500.0],
                count: 1
            }
        );

        let skew = engine.distribution_insights();
        assert_eq!(skew.len(), 1);
        assert!(skew[0].description.contains("right skewness"));
        assert!(skew[0].confidence <= MAX_HEURISTIC_CONFIDENCE);
    }

    #[test]
    fn test_pattern_insight() {
        let mut rows: Vec<Row> = (0..30).map(|_| row([("c", Value::from("a"))])).collect();
        rows.extend((0..10).map(|_| row([("c", Value::from("b"))])));
        rows.push(row([("c", Value::from(""))]));
        let dataset = analyze(rows, "t");

        let patterns = InsightEngine::new(&dataset).pattern_insights();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].confidence, 75.0);
        assert_eq!(patterns[0].description, "\"a\" represents 75.0% of all values");
    }

    #[test]
    fn test_generate_ranks_and_caps() {
        let rows: Vec<Row> = (0..40)
            .map(|i| {
                let mut r = Row::new();
                for c in 0..6 {
                    r.insert(format!("c{}", c), Value::from(i * (c + 1)));
                }
                r
            })
            .collect();
        let dataset = analyze(rows, "t");
        let insights = InsightEngine::new(&dataset).generate_insights();

        // 6 perfectly correlated columns give 15 pairs.
        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert!(insights.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        assert!(insights.iter().all(|i| i.insight_type() == InsightType::Correlation));
    }

    #[test]
    fn test_empty_dataset_has_no_insights() {
        let dataset = analyze(Vec::new(), "empty");
        assert!(InsightEngine::new(&dataset).generate_insights().is_empty());
    }
}
