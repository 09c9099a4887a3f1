//! Descriptive statistics, outlier fences, correlation and regression.
//!
//! Everything here degrades to `None`, `0.0` or an empty result on
//! insufficient or degenerate input; nothing panics or errors.

use serde::{Deserialize, Serialize};

use crate::schema::ColumnStats;

/// Multiplier applied to the IQR when building outlier fences.
pub const IQR_MULTIPLIER: f64 = 1.5;
/// Minimum number of (x, y) pairs for a regression fit.
pub const MIN_REGRESSION_PAIRS: usize = 10;

/// Closed-form single-feature least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Nearest-rank quantile: `sorted[floor(n * p)]`, no interpolation.
fn rank_quantile(sorted: &[f64], p: f64) -> f64 {
    let idx = (sorted.len() as f64 * p).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Arithmetic mean, `None` on empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample variance; 0 for fewer than two values.
fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample standard deviation, `None` on empty input.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(sample_variance(values, m).sqrt())
}

/// Mean, median, sample variance/std and the rank-based five-point summary.
pub fn basic_stats(values: &[f64]) -> Option<ColumnStats> {
    let mean = mean(values)?;
    let sorted = sorted(values);
    let n = sorted.len();

    let variance = sample_variance(values, mean);
    let min = sorted[0];
    let max = sorted[n - 1];
    let median = median_of_sorted(&sorted);

    Some(ColumnStats {
        count: n,
        mean,
        median,
        std: variance.sqrt(),
        variance,
        min,
        max,
        quartiles: [
            min,
            rank_quantile(&sorted, 0.25),
            median,
            rank_quantile(&sorted, 0.75),
            max,
        ],
    })
}

/// Lower and upper IQR fences, `None` on empty input.
pub fn outlier_bounds(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let q1 = rank_quantile(&sorted, 0.25);
    let q3 = rank_quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    Some((q1 - IQR_MULTIPLIER * iqr, q3 + IQR_MULTIPLIER * iqr))
}

/// Values strictly outside the IQR fences, in their original order.
pub fn detect_outliers(values: &[f64]) -> Vec<f64> {
    let Some((lower, upper)) = outlier_bounds(values) else {
        return Vec::new();
    };

    values
        .iter()
        .copied()
        .filter(|&v| v < lower || v > upper)
        .collect()
}

/// Pearson correlation coefficient in `[-1, 1]`.
///
/// Returns 0 for mismatched lengths, empty input or a zero denominator
/// (a constant series).
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|a| a * a).sum();
    let sum_yy: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y)).sqrt();

    // Rounding can leave a tiny negative product under the root (NaN).
    if !(denominator.is_finite() && denominator > 0.0) {
        return 0.0;
    }

    (numerator / denominator).clamp(-1.0, 1.0)
}

/// Ordinary least squares on `(x, y)` pairs.
///
/// Needs at least [`MIN_REGRESSION_PAIRS`] pairs and a non-zero
/// `n*Σx² - (Σx)²`. When the target is constant the fit is still returned
/// with `r_squared` of 0.
pub fn linear_regression(pairs: &[(f64, f64)]) -> Option<Regression> {
    if pairs.len() < MIN_REGRESSION_PAIRS {
        return None;
    }

    let n = pairs.len() as f64;
    let sum_x: f64 = pairs.iter().map(|p| p.0).sum();
    let sum_y: f64 = pairs.iter().map(|p| p.1).sum();
    let sum_xy: f64 = pairs.iter().map(|p| p.0 * p.1).sum();
    let sum_xx: f64 = pairs.iter().map(|p| p.0 * p.0).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let total_ss: f64 = pairs.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
    let residual_ss: f64 = pairs
        .iter()
        .map(|p| (p.1 - (slope * p.0 + intercept)).powi(2))
        .sum();

    let r_squared = if total_ss > 0.0 {
        1.0 - residual_ss / total_ss
    } else {
        0.0
    };

    Some(Regression {
        slope,
        intercept,
        r_squared,
    })
}

/// Third-moment skewness `Σ(v-mean)³ / (n·std³)` using the sample std.
///
/// `None` when the input is empty or the std is zero.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let std = sample_variance(values, m).sqrt();
    if std <= 0.0 {
        return None;
    }
    let third: f64 = values.iter().map(|v| (v - m).powi(3)).sum();
    Some(third / (values.len() as f64 * std.powi(3)))
}
