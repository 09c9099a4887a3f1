//! Single-feature regression model and correlation-based feature importance.

use serde::Serialize;

use crate::inference::{correlation, linear_regression};

use super::InsightEngine;

/// Predictions included with a model.
const MAX_PREDICTIONS: usize = 50;

/// One fitted point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub actual: f64,
    pub predicted: f64,
    pub feature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coefficients {
    pub slope: f64,
    pub intercept: f64,
}

/// A closed-form linear regression of the target on one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionModel {
    /// Always `"linear_regression"`.
    #[serde(rename = "type")]
    pub model_type: String,
    pub target: String,
    /// The single feature the model was fitted on.
    pub features: Vec<String>,
    /// Requested features that were not used.
    pub ignored_features: Vec<String>,
    /// `r_squared * 100`.
    pub accuracy: f64,
    pub r_squared: f64,
    pub coefficients: Coefficients,
    /// Fitted values for the leading pairs.
    pub predictions: Vec<Prediction>,
}

impl PredictionModel {
    pub fn predict(&self, feature: f64) -> f64 {
        self.coefficients.slope * feature + self.coefficients.intercept
    }
}

/// Absolute correlation of a feature with the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    /// Always `"correlation"`.
    pub method: String,
}

impl InsightEngine<'_> {
    /// Fit `target` on the first of `features`.
    ///
    /// Only the first feature is used; any further features are accepted,
    /// logged and reported in `ignored_features`. Returns `None` when no
    /// feature is given, fewer than ten rows hold numbers in both columns, or
    /// the feature is constant.
    pub fn create_prediction_model(
        &self,
        target: &str,
        features: &[String],
    ) -> Option<PredictionModel> {
        let (feature, ignored) = features.split_first()?;
        if !ignored.is_empty() {
            log::warn!(
                "prediction model uses only the first feature '{}'; ignoring {:?}",
                feature,
                ignored
            );
        }

        let pairs = self.dataset.numeric_pairs(feature, target);
        let fit = linear_regression(&pairs)?;

        let predictions = pairs
            .iter()
            .take(MAX_PREDICTIONS)
            .map(|&(x, y)| Prediction {
                actual: y,
                predicted: fit.predict(x),
                feature: x,
            })
            .collect();

        Some(PredictionModel {
            model_type: "linear_regression".to_string(),
            target: target.to_string(),
            features: vec![feature.clone()],
            ignored_features: ignored.to_vec(),
            accuracy: fit.r_squared * 100.0,
            r_squared: fit.r_squared,
            coefficients: Coefficients {
                slope: fit.slope,
                intercept: fit.intercept,
            },
            predictions,
        })
    }

    /// Rank the other numeric columns by `|correlation|` with `target`,
    /// highest first.
    ///
    /// Correlation is computed over rows where both columns hold numbers.
    /// Empty when the target is absent, not numeric or has no numbers.
    pub fn calculate_feature_importance(&self, target: &str) -> Vec<FeatureImportance> {
        let Some(target_column) = self.dataset.column(target) else {
            return Vec::new();
        };
        if !target_column.is_numeric() || target_column.numeric_values().is_empty() {
            return Vec::new();
        }

        let mut scores: Vec<FeatureImportance> = self
            .dataset
            .columns()
            .iter()
            .filter(|c| c.name != target && c.is_numeric())
            .filter_map(|c| {
                let pairs = self.dataset.numeric_pairs(&c.name, target);
                if pairs.is_empty() {
                    return None;
                }
                let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
                Some(FeatureImportance {
                    feature: c.name.clone(),
                    importance: correlation(&x, &y).abs(),
                    method: "correlation".to_string(),
                })
            })
            .collect();

        scores.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        scores
    }
}
