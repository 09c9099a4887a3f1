//! Insights, regression models, feature importance and drift detection.

mod drift;
mod generator;
mod insight;
mod model;

pub use drift::{DEFAULT_DRIFT_THRESHOLD, DriftKind, DriftRecord};
pub use generator::{
    CORRELATION_THRESHOLD, DOMINANT_CATEGORY_PERCENT, InsightEngine, MAX_INSIGHTS,
    MIN_CORRELATION_PAIRS, SKEW_THRESHOLD,
};
pub use insight::{Insight, InsightKind, InsightType};
pub use model::{Coefficients, FeatureImportance, Prediction, PredictionModel};
