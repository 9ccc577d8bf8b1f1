// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Block comparison of recent against previous workouts

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{statistics, RecoveryPattern};
use crate::config::TrendConfig;
use crate::models::{intervals_in_days, Workout};

/// Outcome of a long-term trend analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermTrendResult {
    /// Change of mean efficiency, recent vs previous block, in percent
    pub efficiency_improvement: f64,
    /// Change of mean distance, recent vs previous block, in kilometers
    pub distance_improvement: f64,
    pub recovery_pattern: RecoveryPattern,
    pub recent_average_efficiency: f64,
    pub previous_average_efficiency: f64,
    pub recent_average_distance: f64,
    pub previous_average_distance: f64,
    /// Mean days between the most recent workouts, when enough exist
    pub average_recovery_days: Option<f64>,
}

impl LongTermTrendResult {
    fn insufficient() -> Self {
        Self {
            efficiency_improvement: 0.0,
            distance_improvement: 0.0,
            recovery_pattern: RecoveryPattern::InsufficientData,
            recent_average_efficiency: 0.0,
            previous_average_efficiency: 0.0,
            recent_average_distance: 0.0,
            previous_average_distance: 0.0,
            average_recovery_days: None,
        }
    }
}

/// Compares the newest block of workouts with the block before it
#[derive(Debug, Clone, Default)]
pub struct LongTermTrendAnalyzer {
    config: TrendConfig,
}

impl LongTermTrendAnalyzer {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Analyze a newest-first history
    pub fn analyze(&self, history: &[Workout]) -> LongTermTrendResult {
        if history.len() < self.config.min_workouts {
            debug!(workouts = history.len(), "Not enough workouts for long-term trend");
            return LongTermTrendResult::insufficient();
        }

        let recent_end = history.len().min(self.config.recent_window);
        let previous_end = history.len().min(recent_end + self.config.previous_window);
        let recent = &history[..recent_end];
        let previous = &history[recent_end..previous_end];

        let recent_average_efficiency = Self::average_efficiency(recent);
        let previous_average_efficiency = Self::average_efficiency(previous);
        let efficiency_improvement = if previous_average_efficiency > 0.0 {
            (recent_average_efficiency - previous_average_efficiency) / previous_average_efficiency
                * 100.0
        } else {
            0.0
        };

        let recent_average_distance = Self::average_distance(recent);
        let previous_average_distance = Self::average_distance(previous);
        let distance_improvement = recent_average_distance - previous_average_distance;

        let average_recovery_days = self.average_recovery_days(history);
        let recovery_pattern = average_recovery_days
            .map_or(RecoveryPattern::InsufficientData, |days| self.classify_recovery(days));

        debug!(
            recent = recent.len(),
            previous = previous.len(),
            efficiency_improvement,
            distance_improvement,
            recovery = %recovery_pattern,
            "Long-term trend analyzed"
        );

        LongTermTrendResult {
            efficiency_improvement,
            distance_improvement,
            recovery_pattern,
            recent_average_efficiency,
            previous_average_efficiency,
            recent_average_distance,
            previous_average_distance,
            average_recovery_days,
        }
    }

    /// Bucket a mean interval (days) into a recovery pattern
    pub fn classify_recovery(&self, days: f64) -> RecoveryPattern {
        let [daily, every_other, two_day, three_to_four] = self.config.recovery_bucket_edges;
        if days < daily {
            RecoveryPattern::Daily
        } else if days < every_other {
            RecoveryPattern::EveryOtherDay
        } else if days < two_day {
            RecoveryPattern::TwoDayGap
        } else if days < three_to_four {
            RecoveryPattern::ThreeToFourDayGap
        } else {
            RecoveryPattern::Irregular
        }
    }

    fn average_recovery_days(&self, history: &[Workout]) -> Option<f64> {
        if history.len() < self.config.min_workouts_for_recovery {
            return None;
        }
        let window = &history[..history.len().min(self.config.recent_window.max(2))];
        statistics::mean(&intervals_in_days(window))
    }

    fn average_efficiency(workouts: &[Workout]) -> f64 {
        let values: Vec<f64> = workouts.iter().filter_map(Workout::efficiency_index).collect();
        statistics::mean(&values).unwrap_or(0.0)
    }

    fn average_distance(workouts: &[Workout]) -> f64 {
        let values: Vec<f64> = workouts.iter().map(Workout::distance).collect();
        statistics::mean(&values).unwrap_or(0.0)
    }
}
