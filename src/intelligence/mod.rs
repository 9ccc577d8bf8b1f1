// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Intelligence Module
//!
//! Statistical analysis of running workouts.
//!
//! This module includes:
//! - Numeric primitives (mean, CV, least squares trend, percentiles)
//! - Pace stability classification
//! - Aerobic efficiency level and trend
//! - Optimal cadence band detection
//! - Heart rate zone distribution
//! - Overtraining risk scoring
//! - Long-term progress and recovery pattern
//!
//! Every analyzer is a pure function of its inputs and its configuration. The
//! [`AnalysisFacade`] is the single entry point callers are expected to use.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod analyzer;
pub mod cadence;
pub mod efficiency;
pub mod long_term_trend;
pub mod overtraining;
pub mod pace_stability;
pub mod statistics;
pub mod zones;

pub use analyzer::{AnalysisError, AnalysisFacade, HistoryReport, WorkoutReport};
pub use cadence::{CadenceOptimizer, CadenceResult, StrideReading};
pub use efficiency::{EfficiencyAnalyzer, EfficiencyResult};
pub use long_term_trend::{LongTermTrendAnalyzer, LongTermTrendResult};
pub use overtraining::{OvertrainingResult, OvertrainingRiskAssessor, RiskSignals};
pub use pace_stability::{PaceStabilityAnalyzer, PaceStabilityResult};
pub use zones::{HeartRateZoneAnalyzer, ZoneDistribution};

/// Direction of a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// Pace consistency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityLevel {
    Stable,
    Moderate,
    Unstable,
    InsufficientData,
}

/// Overtraining risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Absolute aerobic efficiency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyLevel {
    Low,
    Moderate,
    High,
    InsufficientData,
}

/// Typical number of days between consecutive workouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPattern {
    Daily,
    EveryOtherDay,
    TwoDayGap,
    ThreeToFourDayGap,
    Irregular,
    InsufficientData,
}

impl fmt::Display for RecoveryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Daily => "daily",
            Self::EveryOtherDay => "every other day",
            Self::TwoDayGap => "two-day gap",
            Self::ThreeToFourDayGap => "3-4 day gap",
            Self::Irregular => "irregular",
            Self::InsufficientData => "insufficient data",
        };
        f.write_str(label)
    }
}
