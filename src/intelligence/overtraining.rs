// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Overtraining risk scoring
//!
//! Three independent signals each add their configured weight to a score:
//!
//! - **Frequency**: mean gap between the most recent workouts is too short
//! - **Volume**: recent mean distance spikes above the preceding baseline
//! - **Efficiency**: aerobic efficiency trends down across recent workouts
//!
//! The score is partitioned into [`RiskLevel`] bands, and recommended rest days
//! follow from the level alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{statistics, RiskLevel};
use crate::config::OvertrainingConfig;
use crate::constants::{efficiency, messages};
use crate::models::{intervals_in_days, Workout};

/// Per-signal breakdown behind a risk score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSignals {
    pub frequency_triggered: bool,
    /// Mean days between workouts in the frequency window
    pub average_interval_days: Option<f64>,
    pub volume_triggered: bool,
    /// Recent mean distance over baseline mean distance
    pub volume_ratio: Option<f64>,
    pub efficiency_triggered: bool,
    /// Slope of chronologically ordered efficiency indices
    pub efficiency_trend: Option<f64>,
}

/// Outcome of an overtraining assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertrainingResult {
    pub level: RiskLevel,
    /// Sum of the weights of triggered signals
    pub score: f64,
    pub signals: RiskSignals,
    /// Never empty
    pub recommendations: Vec<String>,
    pub recommended_rest_days: u32,
}

/// Scores overtraining risk from a newest-first workout history
#[derive(Debug, Clone)]
pub struct OvertrainingRiskAssessor {
    config: OvertrainingConfig,
    trend_epsilon: f64,
}

impl Default for OvertrainingRiskAssessor {
    fn default() -> Self {
        Self::new(OvertrainingConfig::default(), efficiency::TREND_EPSILON)
    }
}

impl OvertrainingRiskAssessor {
    /// `trend_epsilon` is the efficiency slope magnitude still treated as flat
    pub fn new(config: OvertrainingConfig, trend_epsilon: f64) -> Self {
        Self {
            config,
            trend_epsilon,
        }
    }

    pub fn assess(&self, history: &[Workout]) -> OvertrainingResult {
        if history.len() < self.config.min_workouts.max(2) {
            debug!(workouts = history.len(), "Not enough workouts for overtraining risk");
            return OvertrainingResult {
                level: RiskLevel::Low,
                score: 0.0,
                signals: RiskSignals::default(),
                recommendations: vec![messages::RISK_INSUFFICIENT.to_string()],
                recommended_rest_days: self.rest_days(RiskLevel::Low),
            };
        }

        let mut signals = RiskSignals::default();
        let mut recommendations = Vec::new();
        let mut score = 0.0;

        signals.average_interval_days = self.average_interval(history);
        if signals
            .average_interval_days
            .is_some_and(|days| days < self.config.min_average_interval_days)
        {
            signals.frequency_triggered = true;
            score += self.config.frequency_weight;
            recommendations.push(messages::RISK_FREQUENCY.to_string());
        }

        signals.volume_ratio = self.volume_ratio(history);
        if signals
            .volume_ratio
            .is_some_and(|ratio| ratio > self.config.volume_spike_ratio)
        {
            signals.volume_triggered = true;
            score += self.config.volume_weight;
            recommendations.push(messages::RISK_VOLUME.to_string());
        }

        signals.efficiency_trend = self.efficiency_trend(history);
        if signals
            .efficiency_trend
            .is_some_and(|slope| slope < -self.trend_epsilon)
        {
            signals.efficiency_triggered = true;
            score += self.config.efficiency_weight;
            recommendations.push(messages::RISK_EFFICIENCY.to_string());
        }

        let level = self.level_for_score(score);
        if recommendations.is_empty() {
            recommendations.push(messages::RISK_NONE.to_string());
        }

        debug!(
            workouts = history.len(),
            score,
            level = ?level,
            frequency = signals.frequency_triggered,
            volume = signals.volume_triggered,
            efficiency = signals.efficiency_triggered,
            "Overtraining risk assessed"
        );

        OvertrainingResult {
            level,
            score,
            signals,
            recommendations,
            recommended_rest_days: self.rest_days(level),
        }
    }

    /// Partition a combined score into risk bands
    pub fn level_for_score(&self, score: f64) -> RiskLevel {
        if score >= self.config.high_risk_score {
            RiskLevel::High
        } else if score >= self.config.medium_risk_score {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Fixed mapping from risk level to recommended rest days
    pub fn rest_days(&self, level: RiskLevel) -> u32 {
        match level {
            RiskLevel::Low => self.config.rest_days_low,
            RiskLevel::Medium => self.config.rest_days_medium,
            RiskLevel::High => self.config.rest_days_high,
        }
    }

    fn average_interval(&self, history: &[Workout]) -> Option<f64> {
        let window = &history[..history.len().min(self.config.frequency_window)];
        statistics::mean(&intervals_in_days(window))
    }

    fn volume_ratio(&self, history: &[Workout]) -> Option<f64> {
        let recent_end = history.len().min(self.config.volume_recent_window);
        let baseline_end = history
            .len()
            .min(recent_end + self.config.volume_baseline_window);

        let distances = |workouts: &[Workout]| -> Vec<f64> {
            workouts.iter().map(Workout::distance).collect()
        };
        let recent = statistics::mean(&distances(&history[..recent_end]))?;
        let baseline = statistics::mean(&distances(&history[recent_end..baseline_end]))?;

        (baseline > 0.0).then(|| recent / baseline)
    }

    fn efficiency_trend(&self, history: &[Workout]) -> Option<f64> {
        let window = &history[..history.len().min(self.config.efficiency_window)];
        let series: Vec<f64> = window
            .iter()
            .rev()
            .filter_map(Workout::efficiency_index)
            .collect();
        statistics::linear_regression(&series).map(|r| r.slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn newest() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 30, 7, 0, 0).unwrap()
    }

    /// Newest-first workouts spaced `gap_hours` apart with the given distances
    fn history(gap_hours: i64, distances: &[f64]) -> Vec<Workout> {
        distances
            .iter()
            .enumerate()
            .map(|(i, distance)| {
                let mut workout = Workout::new(format!("w{i}"), newest() - Duration::hours(gap_hours * i as i64));
                workout.distance_km = *distance;
                workout
            })
            .collect()
    }

    fn with_efficiencies(mut workouts: Vec<Workout>, newest_first: &[f64]) -> Vec<Workout> {
        for (workout, efficiency) in workouts.iter_mut().zip(newest_first) {
            // efficiency = (3600 / pace) / 150  =>  pace = 3600 / (efficiency * 150)
            workout.average_heart_rate = 150.0;
            workout.average_pace = 3600.0 / (efficiency * 150.0);
        }
        workouts
    }

    #[test]
    fn test_insufficient_history() {
        let assessor = OvertrainingRiskAssessor::default();

        for workouts in [vec![], history(24, &[10.0])] {
            let result = assessor.assess(&workouts);
            assert_eq!(result.level, RiskLevel::Low);
            assert_eq!(result.recommendations, vec![messages::RISK_INSUFFICIENT.to_string()]);
            assert_eq!(result.recommended_rest_days, 1);
        }
    }

    #[test]
    fn test_no_signals() {
        let assessor = OvertrainingRiskAssessor::default();
        let workouts = with_efficiencies(history(48, &[10.0; 6]), &[0.07; 6]);

        let result = assessor.assess(&workouts);
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.recommendations, vec![messages::RISK_NONE.to_string()]);
        assert_eq!(result.signals.average_interval_days, Some(2.0));
        assert_eq!(result.signals.volume_ratio, Some(1.0));
    }

    #[test]
    fn test_frequency_signal_alone() {
        let assessor = OvertrainingRiskAssessor::default();
        let workouts = history(12, &[8.0; 7]);

        let result = assessor.assess(&workouts);
        assert!(result.signals.frequency_triggered);
        assert!(!result.signals.volume_triggered);
        assert!(!result.signals.efficiency_triggered);
        assert_eq!(result.signals.average_interval_days, Some(0.5));
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.recommended_rest_days, 2);
        assert_eq!(result.recommendations, vec![messages::RISK_FREQUENCY.to_string()]);
    }

    #[test]
    fn test_volume_signal_alone() {
        let assessor = OvertrainingRiskAssessor::default();
        let workouts = history(48, &[15.0, 15.0, 15.0, 10.0, 10.0]);

        let result = assessor.assess(&workouts);
        assert!(result.signals.volume_triggered);
        assert!(!result.signals.frequency_triggered);
        assert_eq!(result.signals.volume_ratio, Some(1.5));
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.recommendations, vec![messages::RISK_VOLUME.to_string()]);
    }

    #[test]
    fn test_volume_without_baseline_is_ignored() {
        let assessor = OvertrainingRiskAssessor::default();
        let result = assessor.assess(&history(48, &[30.0, 5.0]));

        assert_eq!(result.signals.volume_ratio, None);
        assert!(!result.signals.volume_triggered);
    }

    #[test]
    fn test_efficiency_signal_alone() {
        let assessor = OvertrainingRiskAssessor::default();
        let workouts = with_efficiencies(
            history(48, &[10.0; 5]),
            &[0.060, 0.064, 0.068, 0.072, 0.076],
        );

        let result = assessor.assess(&workouts);
        assert!(result.signals.efficiency_triggered);
        assert!(!result.signals.frequency_triggered);
        assert!(!result.signals.volume_triggered);
        assert!(result.signals.efficiency_trend.unwrap() < -0.001);
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.recommendations, vec![messages::RISK_EFFICIENCY.to_string()]);
    }

    #[test]
    fn test_all_signals_give_high_risk() {
        let assessor = OvertrainingRiskAssessor::default();
        let workouts = with_efficiencies(
            history(12, &[20.0, 20.0, 20.0, 10.0, 10.0, 10.0, 10.0]),
            &[0.060, 0.064, 0.068, 0.072, 0.076, 0.076, 0.076],
        );

        let result = assessor.assess(&workouts);
        assert_eq!(result.score, 3.0);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.recommended_rest_days, 3);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_weights_are_tunable() {
        let config = OvertrainingConfig {
            frequency_weight: 2.5,
            ..OvertrainingConfig::default()
        };
        let assessor = OvertrainingRiskAssessor::new(config, 0.001);

        let result = assessor.assess(&history(12, &[8.0; 7]));
        assert_eq!(result.score, 2.5);
        assert_eq!(result.level, RiskLevel::High);
    }

    #[test]
    fn test_level_for_score_bands() {
        let assessor = OvertrainingRiskAssessor::default();
        assert_eq!(assessor.level_for_score(0.0), RiskLevel::Low);
        assert_eq!(assessor.level_for_score(0.99), RiskLevel::Low);
        assert_eq!(assessor.level_for_score(1.0), RiskLevel::Medium);
        assert_eq!(assessor.level_for_score(2.0), RiskLevel::High);
    }
}
