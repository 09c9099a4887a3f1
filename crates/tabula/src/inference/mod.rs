//! Type detection and the statistics engine.

mod detection;
mod statistical;

pub use detection::{
    CATEGORICAL_MAX_DISTINCT, CATEGORICAL_UNIQUE_RATIO, DATE_RATIO_THRESHOLD,
    NUMERIC_RATIO_THRESHOLD, detect_column_type, looks_like_date,
};
pub use statistical::{
    IQR_MULTIPLIER, MIN_REGRESSION_PAIRS, Regression, basic_stats, correlation, detect_outliers,
    linear_regression, mean, outlier_bounds, skewness, std_dev,
};
