// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aerobic efficiency (speed produced per heartbeat) and its trend

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{statistics, EfficiencyLevel, TrendDirection};
use crate::config::EfficiencyThresholds;
use crate::constants::messages;
use crate::models::{efficiency_index, Sample, Workout};

/// Outcome of an efficiency analysis
///
/// Both the trend-based `recommendation` and the absolute `level_recommendation`
/// are always filled; callers choose which one to surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyResult {
    /// Mean efficiency index (km/h per bpm), 0 when no valid readings
    pub average_efficiency: f64,
    /// Least squares slope across the ordered efficiency series
    pub trend: f64,
    pub direction: TrendDirection,
    pub recommendation: String,
    pub level: EfficiencyLevel,
    pub level_recommendation: String,
    /// Number of efficiency values the result is based on
    pub sample_count: usize,
}

/// Computes efficiency level and trend from pace and heart rate
#[derive(Debug, Clone, Default)]
pub struct EfficiencyAnalyzer {
    thresholds: EfficiencyThresholds,
}

impl EfficiencyAnalyzer {
    pub fn new(thresholds: EfficiencyThresholds) -> Self {
        Self { thresholds }
    }

    /// Analyze time-ascending samples of a single workout
    pub fn analyze_samples(&self, samples: &[Sample]) -> EfficiencyResult {
        let series: Vec<f64> = samples.iter().filter_map(Sample::efficiency).collect();
        self.analyze_efficiencies(&series)
    }

    /// Analyze parallel pace and heart rate series, paired index-wise
    ///
    /// Indices missing from the shorter series count as absent readings.
    pub fn analyze_series(&self, paces: &[f64], heart_rates: &[f64]) -> EfficiencyResult {
        let len = paces.len().max(heart_rates.len());
        let series: Vec<f64> = (0..len)
            .filter_map(|i| {
                efficiency_index(
                    paces.get(i).copied().unwrap_or(0.0),
                    heart_rates.get(i).copied().unwrap_or(0.0),
                )
            })
            .collect();
        self.analyze_efficiencies(&series)
    }

    pub fn analyze_workout(&self, workout: &Workout) -> EfficiencyResult {
        if workout.samples.iter().any(|s| s.efficiency().is_some()) {
            return self.analyze_samples(&workout.samples);
        }
        let series: Vec<f64> = workout.efficiency_index().into_iter().collect();
        self.analyze_efficiencies(&series)
    }

    /// Efficiency trend across a newest-first history
    ///
    /// Workouts are reversed into chronological order before the slope is
    /// taken, so a positive trend still means improvement over time.
    pub fn analyze_history(&self, history: &[Workout]) -> EfficiencyResult {
        let series: Vec<f64> = history
            .iter()
            .rev()
            .filter_map(Workout::efficiency_index)
            .collect();
        self.analyze_efficiencies(&series)
    }

    /// Analyze an already computed, time-ascending efficiency series
    pub fn analyze_efficiencies(&self, series: &[f64]) -> EfficiencyResult {
        let average_efficiency = statistics::mean(series).unwrap_or(0.0);
        let trend = statistics::linear_trend_slope(series);
        let direction = statistics::classify_trend(trend, self.thresholds.trend_epsilon);
        let level = self.classify_level(series.len(), average_efficiency);

        debug!(
            samples = series.len(),
            average_efficiency,
            trend,
            direction = ?direction,
            "Efficiency analyzed"
        );

        EfficiencyResult {
            average_efficiency,
            trend,
            direction,
            recommendation: Self::trend_recommendation(direction).to_string(),
            level,
            level_recommendation: Self::level_recommendation(level).to_string(),
            sample_count: series.len(),
        }
    }

    /// Absolute efficiency band for a mean efficiency value
    pub fn classify_level(&self, sample_count: usize, average_efficiency: f64) -> EfficiencyLevel {
        if sample_count == 0 {
            EfficiencyLevel::InsufficientData
        } else if average_efficiency < self.thresholds.low_level_max {
            EfficiencyLevel::Low
        } else if average_efficiency > self.thresholds.high_level_min {
            EfficiencyLevel::High
        } else {
            EfficiencyLevel::Moderate
        }
    }

    fn trend_recommendation(direction: TrendDirection) -> &'static str {
        match direction {
            TrendDirection::Improving => messages::EFFICIENCY_IMPROVING,
            TrendDirection::Declining => messages::EFFICIENCY_DECLINING,
            TrendDirection::Stable => messages::EFFICIENCY_STABLE,
        }
    }

    fn level_recommendation(level: EfficiencyLevel) -> &'static str {
        match level {
            EfficiencyLevel::Low => messages::EFFICIENCY_LOW,
            EfficiencyLevel::Moderate => messages::EFFICIENCY_MODERATE,
            EfficiencyLevel::High => messages::EFFICIENCY_HIGH,
            EfficiencyLevel::InsufficientData => messages::EFFICIENCY_INSUFFICIENT,
        }
    }
}
