// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Numeric primitives shared by the analyzers
//!
//! Everything here is domain-free: callers are responsible for filtering
//! absent readings before handing values over.

use serde::{Deserialize, Serialize};

use super::TrendDirection;

/// Ordinary least squares fit of value against index position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Change in value per index step
    pub slope: f64,
    /// Fitted value at index 0
    pub intercept: f64,
    /// Coefficient of determination (0-1)
    pub r_squared: f64,
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance, `None` for an empty slice
pub fn variance(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>();
    Some(sum_sq / values.len() as f64)
}

/// Population standard deviation, `None` for an empty slice
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Standard deviation over mean, as a percentage
///
/// Returns 0 for fewer than two values (a single reading has no spread) and
/// when the mean is zero.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    match (mean(values), std_dev(values)) {
        (Some(avg), Some(sd)) if avg != 0.0 => (sd / avg.abs()) * 100.0,
        _ => 0.0,
    }
}

/// Least squares fit against index position; `None` for fewer than two values
pub fn linear_regression(values: &[f64]) -> Option<RegressionResult> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    // sxx > 0 whenever n >= 2
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy == 0.0 {
        0.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(RegressionResult {
        slope,
        intercept,
        r_squared,
    })
}

/// Slope of value against index position, 0 for fewer than two values
pub fn linear_trend_slope(values: &[f64]) -> f64 {
    linear_regression(values).map_or(0.0, |r| r.slope)
}

/// Classify a slope; magnitudes within `epsilon` are stable
pub fn classify_trend(slope: f64, epsilon: f64) -> TrendDirection {
    if slope > epsilon {
        TrendDirection::Improving
    } else if slope < -epsilon {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Percentile (0-100) with linear interpolation between closest ranks
///
/// NaN inputs are ignored. Returns `None` when no comparable values remain.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
