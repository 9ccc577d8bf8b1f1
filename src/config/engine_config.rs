// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tunable thresholds for every analyzer in the engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{cadence, efficiency, overtraining, stability, trends, zones};

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

/// Main engine configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stability: StabilityThresholds,
    pub efficiency: EfficiencyThresholds,
    pub cadence: CadenceConfig,
    pub zones: ZoneThresholds,
    pub overtraining: OvertrainingConfig,
    pub trends: TrendConfig,
}

/// Pace stability thresholds on the coefficient of variation (percent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityThresholds {
    pub stable_cv_max: f64,
    pub unstable_cv_min: f64,
    pub min_samples: usize,
}

/// Efficiency trend epsilon and absolute-level bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyThresholds {
    pub trend_epsilon: f64,
    pub low_level_max: f64,
    pub high_level_min: f64,
}

/// Cadence band derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub default_band_low: f64,
    pub default_band_high: f64,
    pub optimal_percentile: f64,
    pub min_samples_for_optimal_range: usize,
    pub min_band_width: f64,
}

/// Heart rate zone upper bounds (as percentage of max HR)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneThresholds {
    pub recovery_max: f64,
    pub endurance_max: f64,
    pub tempo_max: f64,
    pub threshold_max: f64,
    // > threshold_max = vo2max
}

/// Overtraining signal windows, weights and score bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertrainingConfig {
    pub min_workouts: usize,
    pub frequency_window: usize,
    pub min_average_interval_days: f64,
    pub volume_recent_window: usize,
    pub volume_baseline_window: usize,
    pub volume_spike_ratio: f64,
    pub efficiency_window: usize,
    pub frequency_weight: f64,
    pub volume_weight: f64,
    pub efficiency_weight: f64,
    pub medium_risk_score: f64,
    pub high_risk_score: f64,
    pub rest_days_low: u32,
    pub rest_days_medium: u32,
    pub rest_days_high: u32,
}

/// Long-term comparison windows and recovery buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub recent_window: usize,
    pub previous_window: usize,
    pub min_workouts: usize,
    pub min_workouts_for_recovery: usize,
    pub recovery_bucket_edges: [f64; 4],
}

impl EngineConfig {
    /// Check that thresholds describe consistent, non-overlapping bands
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.stability;
        if !(s.stable_cv_max >= 0.0 && s.stable_cv_max <= s.unstable_cv_min) {
            return Err(ConfigError::InvalidThreshold(format!(
                "stable_cv_max ({}) must be non-negative and not above unstable_cv_min ({})",
                s.stable_cv_max, s.unstable_cv_min
            )));
        }
        if s.min_samples < 2 {
            return Err(ConfigError::InvalidWindow(
                "stability.min_samples must be at least 2".to_string(),
            ));
        }

        let e = &self.efficiency;
        if !(e.trend_epsilon >= 0.0) {
            return Err(ConfigError::InvalidThreshold(
                "efficiency.trend_epsilon must be non-negative".to_string(),
            ));
        }
        if e.low_level_max > e.high_level_min {
            return Err(ConfigError::InvalidThreshold(format!(
                "efficiency.low_level_max ({}) must not exceed high_level_min ({})",
                e.low_level_max, e.high_level_min
            )));
        }

        let c = &self.cadence;
        if !(c.default_band_low > 0.0 && c.default_band_low < c.default_band_high) {
            return Err(ConfigError::InvalidThreshold(format!(
                "default cadence band [{}, {}] must be positive and ascending",
                c.default_band_low, c.default_band_high
            )));
        }
        if !(0.0..=100.0).contains(&c.optimal_percentile) {
            return Err(ConfigError::InvalidThreshold(
                "cadence.optimal_percentile must be within 0..=100".to_string(),
            ));
        }
        if c.min_samples_for_optimal_range == 0 || c.min_band_width < 0.0 {
            return Err(ConfigError::InvalidWindow(
                "cadence.min_samples_for_optimal_range must be positive and min_band_width non-negative"
                    .to_string(),
            ));
        }

        let z = &self.zones;
        if !(z.recovery_max < z.endurance_max
            && z.endurance_max < z.tempo_max
            && z.tempo_max < z.threshold_max)
        {
            return Err(ConfigError::InvalidThreshold(
                "heart rate zone bounds must be strictly ascending".to_string(),
            ));
        }

        let o = &self.overtraining;
        if o.min_workouts < 2 {
            return Err(ConfigError::InvalidWindow(
                "overtraining.min_workouts must be at least 2".to_string(),
            ));
        }
        if o.frequency_window < 2 || o.efficiency_window < 2 || o.volume_recent_window == 0 {
            return Err(ConfigError::InvalidWindow(
                "overtraining windows must cover at least two workouts (one for volume)".to_string(),
            ));
        }
        if o.medium_risk_score > o.high_risk_score {
            return Err(ConfigError::InvalidThreshold(format!(
                "medium_risk_score ({}) must not exceed high_risk_score ({})",
                o.medium_risk_score, o.high_risk_score
            )));
        }

        let t = &self.trends;
        if t.recent_window == 0 || t.min_workouts_for_recovery < 2 {
            return Err(ConfigError::InvalidWindow(
                "trends.recent_window must be positive and min_workouts_for_recovery at least 2"
                    .to_string(),
            ));
        }
        if !t.recovery_bucket_edges.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(ConfigError::InvalidThreshold(format!(
                "recovery bucket edges {:?} must be strictly ascending",
                t.recovery_bucket_edges
            )));
        }

        Ok(())
    }
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            stable_cv_max: stability::STABLE_CV_MAX,
            unstable_cv_min: stability::UNSTABLE_CV_MIN,
            min_samples: stability::MIN_SAMPLES,
        }
    }
}

impl Default for EfficiencyThresholds {
    fn default() -> Self {
        Self {
            trend_epsilon: efficiency::TREND_EPSILON,
            low_level_max: efficiency::LOW_LEVEL_MAX,
            high_level_min: efficiency::HIGH_LEVEL_MIN,
        }
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            default_band_low: cadence::DEFAULT_BAND_LOW,
            default_band_high: cadence::DEFAULT_BAND_HIGH,
            optimal_percentile: cadence::OPTIMAL_PERCENTILE,
            min_samples_for_optimal_range: cadence::MIN_SAMPLES_FOR_OPTIMAL_RANGE,
            min_band_width: cadence::MIN_BAND_WIDTH,
        }
    }
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            recovery_max: zones::RECOVERY_MAX,
            endurance_max: zones::ENDURANCE_MAX,
            tempo_max: zones::TEMPO_MAX,
            threshold_max: zones::THRESHOLD_MAX,
        }
    }
}

impl Default for OvertrainingConfig {
    fn default() -> Self {
        Self {
            min_workouts: overtraining::MIN_WORKOUTS,
            frequency_window: overtraining::FREQUENCY_WINDOW,
            min_average_interval_days: overtraining::MIN_AVERAGE_INTERVAL_DAYS,
            volume_recent_window: overtraining::VOLUME_RECENT_WINDOW,
            volume_baseline_window: overtraining::VOLUME_BASELINE_WINDOW,
            volume_spike_ratio: overtraining::VOLUME_SPIKE_RATIO,
            efficiency_window: overtraining::EFFICIENCY_WINDOW,
            frequency_weight: overtraining::FREQUENCY_WEIGHT,
            volume_weight: overtraining::VOLUME_WEIGHT,
            efficiency_weight: overtraining::EFFICIENCY_WEIGHT,
            medium_risk_score: overtraining::MEDIUM_RISK_SCORE,
            high_risk_score: overtraining::HIGH_RISK_SCORE,
            rest_days_low: overtraining::REST_DAYS_LOW,
            rest_days_medium: overtraining::REST_DAYS_MEDIUM,
            rest_days_high: overtraining::REST_DAYS_HIGH,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            recent_window: trends::RECENT_WINDOW,
            previous_window: trends::PREVIOUS_WINDOW,
            min_workouts: trends::MIN_WORKOUTS,
            min_workouts_for_recovery: trends::MIN_WORKOUTS_FOR_RECOVERY,
            recovery_bucket_edges: trends::RECOVERY_BUCKET_EDGES,
        }
    }
}
