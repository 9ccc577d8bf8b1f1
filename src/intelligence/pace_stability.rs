// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pace consistency classification based on the coefficient of variation

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{statistics, StabilityLevel};
use crate::config::StabilityThresholds;
use crate::constants::messages;
use crate::models::{valid_reading, Workout};

/// Outcome of a pace stability analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceStabilityResult {
    /// Coefficient of variation of pace, in percent (0 when insufficient)
    pub cv: f64,
    pub level: StabilityLevel,
    pub warning: String,
    /// Number of valid pace readings used
    pub sample_count: usize,
}

/// Classifies how evenly a run (or a set of runs) was paced
#[derive(Debug, Clone, Default)]
pub struct PaceStabilityAnalyzer {
    thresholds: StabilityThresholds,
}

impl PaceStabilityAnalyzer {
    pub fn new(thresholds: StabilityThresholds) -> Self {
        Self { thresholds }
    }

    /// Analyze raw pace readings in seconds per kilometer
    ///
    /// Absent readings (0) are dropped here even if the caller already filtered.
    pub fn analyze(&self, paces: &[f64]) -> PaceStabilityResult {
        let valid: Vec<f64> = paces.iter().copied().filter_map(valid_reading).collect();

        if valid.len() < self.thresholds.min_samples.max(2) {
            debug!(samples = valid.len(), "Not enough pace samples for stability");
            return PaceStabilityResult {
                cv: 0.0,
                level: StabilityLevel::InsufficientData,
                warning: messages::PACE_INSUFFICIENT.to_string(),
                sample_count: valid.len(),
            };
        }

        let cv = statistics::coefficient_of_variation(&valid);
        let level = self.classify(cv);
        debug!(samples = valid.len(), cv, level = ?level, "Pace stability classified");

        let warning = match level {
            StabilityLevel::Stable => messages::PACE_STABLE,
            StabilityLevel::Moderate => messages::PACE_MODERATE,
            StabilityLevel::Unstable => messages::PACE_UNSTABLE,
            StabilityLevel::InsufficientData => messages::PACE_INSUFFICIENT,
        };

        PaceStabilityResult {
            cv,
            level,
            warning: warning.to_string(),
            sample_count: valid.len(),
        }
    }

    /// Stability of the pace samples within one workout
    pub fn analyze_workout(&self, workout: &Workout) -> PaceStabilityResult {
        self.analyze(&workout.paces())
    }

    /// Stability across runs, using each workout's representative pace
    pub fn analyze_history(&self, history: &[Workout]) -> PaceStabilityResult {
        let paces: Vec<f64> = history
            .iter()
            .filter_map(Workout::representative_pace)
            .collect();
        self.analyze(&paces)
    }

    fn classify(&self, cv: f64) -> StabilityLevel {
        if cv < self.thresholds.stable_cv_max {
            StabilityLevel::Stable
        } else if cv <= self.thresholds.unstable_cv_min {
            StabilityLevel::Moderate
        } else {
            StabilityLevel::Unstable
        }
    }
}
