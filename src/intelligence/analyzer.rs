// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Analysis facade: the single entry point for workout analysis

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    CadenceOptimizer, CadenceResult, EfficiencyAnalyzer, EfficiencyLevel, EfficiencyResult,
    HeartRateZoneAnalyzer, LongTermTrendAnalyzer, LongTermTrendResult, OvertrainingResult,
    OvertrainingRiskAssessor, PaceStabilityAnalyzer, PaceStabilityResult, StabilityLevel,
    ZoneDistribution,
};
use crate::config::EngineConfig;
use crate::logging::AppLogger;
use crate::models::Workout;

/// Everything the engine can say about a single workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutReport {
    pub workout_id: String,
    pub pace_stability: PaceStabilityResult,
    pub efficiency: EfficiencyResult,
    pub cadence: CadenceResult,
    /// Present only when a maximum heart rate was supplied
    pub heart_rate_zones: Option<ZoneDistribution>,
}

/// Everything the engine can say about a newest-first workout history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub workout_count: usize,
    pub pace_stability: PaceStabilityResult,
    pub efficiency: EfficiencyResult,
    pub cadence: CadenceResult,
    pub overtraining: OvertrainingResult,
    pub long_term_trend: LongTermTrendResult,
}

/// Stateless front door over the individual analyzers
///
/// Holds only its configuration; every call borrows caller data for its own
/// duration and returns owned results.
///
/// # Examples
///
/// ```rust
/// use stride_insights::intelligence::{AnalysisFacade, StabilityLevel};
/// use stride_insights::models::{Sample, Workout};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let mut workout = Workout::new("run-1", start);
/// workout.samples = (0..4)
///     .map(|i| Sample::new(start + Duration::seconds(i * 10), 300.0, 150.0, 176.0))
///     .collect();
///
/// let facade = AnalysisFacade::default();
/// let result = facade.pace_stability(&workout);
/// assert_eq!(result.level, StabilityLevel::Stable);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisFacade {
    config: EngineConfig,
}

impl AnalysisFacade {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pace consistency within one workout
    pub fn pace_stability(&self, workout: &Workout) -> PaceStabilityResult {
        let result = self.pace_analyzer().analyze_workout(workout);
        Self::record(
            "pace_stability",
            workout.samples.len(),
            result.level != StabilityLevel::InsufficientData,
        );
        result
    }

    /// Pace consistency across workouts, from each workout's average pace
    pub fn pace_stability_history(&self, history: &[Workout]) -> PaceStabilityResult {
        let result = self.pace_analyzer().analyze_history(history);
        Self::record(
            "pace_stability_history",
            history.len(),
            result.level != StabilityLevel::InsufficientData,
        );
        result
    }

    /// Efficiency level and in-workout trend
    pub fn efficiency(&self, workout: &Workout) -> EfficiencyResult {
        let result = self.efficiency_analyzer().analyze_workout(workout);
        Self::record(
            "efficiency",
            workout.samples.len(),
            result.level != EfficiencyLevel::InsufficientData,
        );
        result
    }

    /// Efficiency trend from oldest to newest workout
    pub fn efficiency_history(&self, history: &[Workout]) -> EfficiencyResult {
        let result = self.efficiency_analyzer().analyze_history(history);
        Self::record(
            "efficiency_history",
            history.len(),
            result.level != EfficiencyLevel::InsufficientData,
        );
        result
    }

    /// Optimal cadence band for one workout
    pub fn cadence_workout(&self, workout: &Workout) -> CadenceResult {
        let result = self.cadence_optimizer().analyze_workout(workout);
        Self::record("cadence", workout.samples.len(), result.current_average > 0.0);
        result
    }

    /// Optimal cadence band from readings pooled across workouts
    pub fn cadence(&self, workouts: &[Workout]) -> CadenceResult {
        let result = self.cadence_optimizer().analyze_workouts(workouts);
        Self::record("cadence_history", workouts.len(), result.current_average > 0.0);
        result
    }

    /// Heart rate zone distribution against a caller-supplied maximum
    pub fn heart_rate_zones(&self, workout: &Workout, max_heart_rate: f64) -> ZoneDistribution {
        let result = HeartRateZoneAnalyzer::new(self.config.zones.clone())
            .analyze_workout(workout, max_heart_rate);
        Self::record("heart_rate_zones", workout.samples.len(), result.sample_count > 0);
        result
    }

    pub fn overtraining_risk(&self, history: &[Workout]) -> OvertrainingResult {
        let assessor = OvertrainingRiskAssessor::new(
            self.config.overtraining.clone(),
            self.config.efficiency.trend_epsilon,
        );
        let result = assessor.assess(history);
        Self::record(
            "overtraining_risk",
            history.len(),
            history.len() >= self.config.overtraining.min_workouts.max(2),
        );
        result
    }

    pub fn long_term_trend(&self, history: &[Workout]) -> LongTermTrendResult {
        let result = LongTermTrendAnalyzer::new(self.config.trends.clone()).analyze(history);
        Self::record(
            "long_term_trend",
            history.len(),
            history.len() >= self.config.trends.min_workouts,
        );
        result
    }

    /// All single-workout analyses; zones only when `max_heart_rate` is given
    pub fn workout_report(&self, workout: &Workout, max_heart_rate: Option<f64>) -> WorkoutReport {
        WorkoutReport {
            workout_id: workout.id.clone(),
            pace_stability: self.pace_stability(workout),
            efficiency: self.efficiency(workout),
            cadence: self.cadence_workout(workout),
            heart_rate_zones: max_heart_rate.map(|max_hr| self.heart_rate_zones(workout, max_hr)),
        }
    }

    /// All history analyses over a newest-first history
    pub fn history_report(&self, history: &[Workout]) -> HistoryReport {
        HistoryReport {
            workout_count: history.len(),
            pace_stability: self.pace_stability_history(history),
            efficiency: self.efficiency_history(history),
            cadence: self.cadence(history),
            overtraining: self.overtraining_risk(history),
            long_term_trend: self.long_term_trend(history),
        }
    }

    /// [`Self::history_report`] on the blocking pool, for async callers
    pub async fn history_report_async(
        &self,
        history: Vec<Workout>,
    ) -> Result<HistoryReport, AnalysisError> {
        let facade = self.clone();
        tokio::task::spawn_blocking(move || facade.history_report(&history))
            .await
            .map_err(|e| AnalysisError::TaskFailed(e.to_string()))
    }

    fn pace_analyzer(&self) -> PaceStabilityAnalyzer {
        PaceStabilityAnalyzer::new(self.config.stability.clone())
    }

    fn efficiency_analyzer(&self) -> EfficiencyAnalyzer {
        EfficiencyAnalyzer::new(self.config.efficiency.clone())
    }

    fn cadence_optimizer(&self) -> CadenceOptimizer {
        CadenceOptimizer::new(self.config.cadence.clone())
    }

    fn record(analysis: &str, inputs: usize, sufficient: bool) {
        AppLogger::log_analysis(analysis, inputs, sufficient);
        if !sufficient {
            warn!(analysis = %analysis, inputs, "Analysis fell back to insufficient data");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis task failed: {0}")]
    TaskFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::{RecoveryPattern, RiskLevel};
    use crate::models::Sample;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 6, 30, 0).unwrap()
    }

    fn steady_workout(id: &str, date: DateTime<Utc>) -> Workout {
        let mut workout = Workout::new(id, date);
        workout.distance_km = 10.0;
        workout.average_pace = 300.0;
        workout.average_heart_rate = 150.0;
        workout.average_cadence = 176.0;
        workout.samples = (0..10)
            .map(|i| Sample::new(date + Duration::seconds(i * 30), 300.0, 150.0, 176.0))
            .collect();
        workout
    }

    fn history(count: i64) -> Vec<Workout> {
        (0..count)
            .map(|i| steady_workout(&format!("w{i}"), start() - Duration::days(2 * i)))
            .collect()
    }

    #[test]
    fn test_facade_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<AnalysisFacade>();
    }

    #[test]
    fn test_workout_report() {
        let facade = AnalysisFacade::default();
        let workout = steady_workout("run", start());

        let report = facade.workout_report(&workout, Some(230.0));
        assert_eq!(report.workout_id, "run");
        assert_eq!(report.pace_stability.level, StabilityLevel::Stable);
        assert!((report.efficiency.average_efficiency - 0.08).abs() < 1e-12);
        assert_eq!(report.cadence.current_average, 176.0);
        let zones = report.heart_rate_zones.unwrap();
        assert_eq!(zones.zone2_endurance, 100.0);

        let without_zones = facade.workout_report(&workout, None);
        assert!(without_zones.heart_rate_zones.is_none());
    }

    #[test]
    fn test_history_report_on_empty_history() {
        let facade = AnalysisFacade::default();
        let report = facade.history_report(&[]);

        assert_eq!(report.workout_count, 0);
        assert_eq!(report.pace_stability.level, StabilityLevel::InsufficientData);
        assert_eq!(report.efficiency.level, EfficiencyLevel::InsufficientData);
        assert_eq!(report.overtraining.level, RiskLevel::Low);
        assert!(!report.overtraining.recommendations.is_empty());
        assert_eq!(
            report.long_term_trend.recovery_pattern,
            RecoveryPattern::InsufficientData
        );
    }

    #[test]
    fn test_config_flows_to_analyzers() {
        let mut config = EngineConfig::default();
        config.cadence.default_band_low = 160.0;
        config.cadence.default_band_high = 170.0;
        let facade = AnalysisFacade::new(config);

        let mut workout = Workout::new("cadence-only", start());
        workout.samples = vec![Sample::new(start(), 0.0, 0.0, 165.0); 3];

        let result = facade.cadence_workout(&workout);
        assert_eq!(result.optimal_range, (160.0, 170.0));
        assert_eq!(result.in_range_percentage, 100.0);
    }

    #[tokio::test]
    async fn test_history_report_async_matches_sync() {
        let facade = AnalysisFacade::default();
        let workouts = history(8);

        let expected = facade.history_report(&workouts);
        let report = facade.history_report_async(workouts).await.unwrap();

        assert_eq!(report, expected);
        assert_eq!(report.workout_count, 8);
        assert_eq!(
            report.long_term_trend.recovery_pattern,
            RecoveryPattern::TwoDayGap
        );
    }
}
