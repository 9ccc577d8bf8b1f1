// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Default thresholds for every analyzer, plus the fixed recommendation texts.
//! Threshold values seed [`crate::config::EngineConfig`] and can be overridden
//! from a TOML file.

/// Unit conversions
pub mod units {
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Pace stability classification (coefficient of variation, percent)
pub mod stability {
    /// Below this CV a run is stable
    pub const STABLE_CV_MAX: f64 = 5.0;
    /// Above this CV a run is unstable
    pub const UNSTABLE_CV_MIN: f64 = 15.0;
    /// Minimum valid pace samples for a classification
    pub const MIN_SAMPLES: usize = 2;
}

/// Aerobic efficiency (km/h per bpm)
pub mod efficiency {
    /// Slopes within +/- this value count as a flat trend
    pub const TREND_EPSILON: f64 = 0.001;
    /// Below this level more easy aerobic work is recommended
    pub const LOW_LEVEL_MAX: f64 = 0.05;
    /// Above this level increasing distance is recommended
    pub const HIGH_LEVEL_MIN: f64 = 0.08;
}

/// Cadence optimisation (steps per minute)
pub mod cadence {
    pub const DEFAULT_BAND_LOW: f64 = 170.0;
    pub const DEFAULT_BAND_HIGH: f64 = 180.0;
    /// Efficiency percentile that marks the top readings
    pub const OPTIMAL_PERCENTILE: f64 = 75.0;
    /// Full (pace, cadence, heart rate) readings needed to derive a personal band
    pub const MIN_SAMPLES_FOR_OPTIMAL_RANGE: usize = 8;
    /// Narrower derived bands are widened to this width
    pub const MIN_BAND_WIDTH: f64 = 4.0;
}

/// Heart rate zone upper bounds, as percent of maximum heart rate
pub mod zones {
    pub const RECOVERY_MAX: f64 = 60.0;
    pub const ENDURANCE_MAX: f64 = 70.0;
    pub const TEMPO_MAX: f64 = 80.0;
    pub const THRESHOLD_MAX: f64 = 90.0;
}

/// Overtraining risk scoring
pub mod overtraining {
    pub const MIN_WORKOUTS: usize = 2;

    pub const FREQUENCY_WINDOW: usize = 7;
    pub const MIN_AVERAGE_INTERVAL_DAYS: f64 = 1.0;

    pub const VOLUME_RECENT_WINDOW: usize = 3;
    pub const VOLUME_BASELINE_WINDOW: usize = 10;
    pub const VOLUME_SPIKE_RATIO: f64 = 1.3;

    pub const EFFICIENCY_WINDOW: usize = 5;

    pub const FREQUENCY_WEIGHT: f64 = 1.0;
    pub const VOLUME_WEIGHT: f64 = 1.0;
    pub const EFFICIENCY_WEIGHT: f64 = 1.0;

    pub const MEDIUM_RISK_SCORE: f64 = 1.0;
    pub const HIGH_RISK_SCORE: f64 = 2.0;

    pub const REST_DAYS_LOW: u32 = 1;
    pub const REST_DAYS_MEDIUM: u32 = 2;
    pub const REST_DAYS_HIGH: u32 = 3;
}

/// Long-term trend windows and recovery buckets
pub mod trends {
    pub const RECENT_WINDOW: usize = 5;
    pub const PREVIOUS_WINDOW: usize = 5;
    pub const MIN_WORKOUTS: usize = 3;
    pub const MIN_WORKOUTS_FOR_RECOVERY: usize = 5;

    /// Upper edges (days) of the daily, every-other-day, two-day and 3-4 day buckets
    pub const RECOVERY_BUCKET_EDGES: [f64; 4] = [1.0, 2.0, 3.0, 5.0];
}

/// User-facing messages
pub mod messages {
    pub const PACE_STABLE: &str = "Pace was steady throughout, great pacing";
    pub const PACE_MODERATE: &str = "Pace varied moderately, aim for more even splits";
    pub const PACE_UNSTABLE: &str = "Pace varies widely, consider even pacing";
    pub const PACE_INSUFFICIENT: &str = "Not enough pace data to assess stability";

    pub const EFFICIENCY_IMPROVING: &str = "Efficiency improving, keep current training load";
    pub const EFFICIENCY_DECLINING: &str = "Efficiency declining, consider more easy aerobic volume";
    pub const EFFICIENCY_STABLE: &str = "Efficiency stable";
    pub const EFFICIENCY_LOW: &str = "Aerobic efficiency is low, add more easy aerobic running";
    pub const EFFICIENCY_MODERATE: &str = "Aerobic efficiency is solid, keep building consistently";
    pub const EFFICIENCY_HIGH: &str = "Aerobic efficiency is high, consider increasing distance";
    pub const EFFICIENCY_INSUFFICIENT: &str = "Not enough pace and heart rate data to assess efficiency";

    pub const CADENCE_NO_DATA: &str = "No cadence data available";
    pub const CADENCE_LOW: &str = "Cadence is below your optimal range, try shorter and quicker steps";
    pub const CADENCE_HIGH: &str = "Cadence is above your optimal range, try lengthening your stride slightly";
    pub const CADENCE_IN_RANGE: &str = "Cadence is within your optimal range";

    pub const RISK_INSUFFICIENT: &str = "Insufficient data to assess overtraining risk, log at least two workouts";
    pub const RISK_FREQUENCY: &str = "Reduce training frequency, workouts are packed too closely together";
    pub const RISK_VOLUME: &str = "Lower intensity, recent volume is well above your usual load";
    pub const RISK_EFFICIENCY: &str = "Add a recovery day, aerobic efficiency is declining";
    pub const RISK_NONE: &str = "Training load looks sustainable, keep it up";
}
