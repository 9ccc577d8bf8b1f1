// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Workout records handed to the analysis engine by the surrounding application.
//!
//! ## Design Principles
//!
//! - **Borrowed, never owned**: the engine only reads these records for the
//!   duration of one analysis call
//! - **Zero means absent**: a reading of exactly `0` is a missing measurement,
//!   never a legitimate value. Use the `valid_*` accessors instead of the raw fields
//! - **Serializable**: records round-trip through JSON so the CLI and callers can
//!   feed the engine from files
//!
//! ## Core Models
//!
//! - [`Sample`]: One measurement instant (pace, heart rate, cadence)
//! - [`Workout`]: Time-ascending samples plus workout-level aggregates
//! - [`WorkoutHistory`]: Workouts ordered newest first

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::units::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

/// Workouts ordered newest first.
///
/// The engine does not re-sort; rolling windows and recovery intervals assume
/// the caller keeps this ordering.
pub type WorkoutHistory<'a> = &'a [Workout];

/// Returns the reading when it is a real measurement.
///
/// Zero, negative and non-finite values are treated as absent.
#[inline]
pub fn valid_reading(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Speed per heartbeat: `(3600 / pace) / heart_rate`.
///
/// Returns `None` when either input is absent, so a sentinel zero can never
/// reach a division.
pub fn efficiency_index(pace_sec_per_km: f64, heart_rate_bpm: f64) -> Option<f64> {
    let pace = valid_reading(pace_sec_per_km)?;
    let heart_rate = valid_reading(heart_rate_bpm)?;
    let speed_kmh = SECONDS_PER_HOUR / pace;
    Some(speed_kmh / heart_rate)
}

/// A single measurement instant within a workout
///
/// # Examples
///
/// ```rust
/// use stride_insights::models::Sample;
/// use chrono::Utc;
///
/// let sample = Sample::new(Utc::now(), 300.0, 150.0, 176.0);
/// assert_eq!(sample.valid_pace(), Some(300.0));
///
/// let missing_hr = Sample::new(Utc::now(), 300.0, 0.0, 176.0);
/// assert_eq!(missing_hr.valid_heart_rate(), None);
/// assert_eq!(missing_hr.efficiency(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the measurement was taken (UTC)
    pub timestamp: DateTime<Utc>,
    /// Pace in seconds per kilometer (0 = missing)
    #[serde(default)]
    pub pace: f64,
    /// Heart rate in beats per minute (0 = missing)
    #[serde(default)]
    pub heart_rate: f64,
    /// Cadence in steps per minute (0 = missing)
    #[serde(default)]
    pub cadence: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, pace: f64, heart_rate: f64, cadence: f64) -> Self {
        Self {
            timestamp,
            pace,
            heart_rate,
            cadence,
        }
    }

    pub fn valid_pace(&self) -> Option<f64> {
        valid_reading(self.pace)
    }

    pub fn valid_heart_rate(&self) -> Option<f64> {
        valid_reading(self.heart_rate)
    }

    pub fn valid_cadence(&self) -> Option<f64> {
        valid_reading(self.cadence)
    }

    /// Efficiency index of this sample, if it carries both pace and heart rate
    pub fn efficiency(&self) -> Option<f64> {
        efficiency_index(self.pace, self.heart_rate)
    }
}

/// A completed run as supplied by the workout store
///
/// Samples are expected in ascending timestamp order. Aggregates use the same
/// zero-means-absent convention as [`Sample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Identifier assigned by the workout store
    pub id: String,
    /// When the workout started (UTC)
    pub date: DateTime<Utc>,
    /// Total duration in seconds
    #[serde(default)]
    pub duration_seconds: u64,
    /// Total distance in kilometers
    #[serde(default)]
    pub distance_km: f64,
    /// Average heart rate in beats per minute
    #[serde(default)]
    pub average_heart_rate: f64,
    /// Average pace in seconds per kilometer
    #[serde(default)]
    pub average_pace: f64,
    /// Average cadence in steps per minute
    #[serde(default)]
    pub average_cadence: f64,
    /// Time-ascending measurement samples
    #[serde(default)]
    pub samples: Vec<Sample>,
}

impl Workout {
    /// Create a workout with aggregates only and no samples
    pub fn new(id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date,
            duration_seconds: 0,
            distance_km: 0.0,
            average_heart_rate: 0.0,
            average_pace: 0.0,
            average_cadence: 0.0,
            samples: Vec::new(),
        }
    }

    /// Valid pace readings in sample order
    pub fn paces(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Sample::valid_pace).collect()
    }

    /// Per-sample efficiency indices in sample order, skipping incomplete samples
    pub fn sample_efficiencies(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Sample::efficiency).collect()
    }

    /// Workout-level efficiency index
    ///
    /// Mean of the per-sample indices when any sample carries both pace and heart
    /// rate, otherwise derived from the aggregate averages.
    pub fn efficiency_index(&self) -> Option<f64> {
        let per_sample = self.sample_efficiencies();
        if per_sample.is_empty() {
            return efficiency_index(self.average_pace, self.average_heart_rate);
        }
        Some(per_sample.iter().sum::<f64>() / per_sample.len() as f64)
    }

    /// Average pace, falling back to the mean of valid sample paces
    pub fn representative_pace(&self) -> Option<f64> {
        valid_reading(self.average_pace).or_else(|| {
            let paces = self.paces();
            (!paces.is_empty()).then(|| paces.iter().sum::<f64>() / paces.len() as f64)
        })
    }

    /// Valid cadence readings in sample order
    pub fn cadences(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Sample::valid_cadence).collect()
    }

    /// Mean of valid sample cadences, falling back to the average cadence
    pub fn representative_cadence(&self) -> Option<f64> {
        let cadences = self.cadences();
        if cadences.is_empty() {
            return valid_reading(self.average_cadence);
        }
        Some(cadences.iter().sum::<f64>() / cadences.len() as f64)
    }

    /// Distance in kilometers, treating missing or invalid distance as zero
    pub fn distance(&self) -> f64 {
        valid_reading(self.distance_km).unwrap_or(0.0)
    }
}

/// Days between each pair of consecutive workouts in a newest-first history
///
/// Derived only from workout dates. An out-of-order pair yields 0 rather than a
/// negative gap.
pub fn intervals_in_days(history: &[Workout]) -> Vec<f64> {
    history
        .windows(2)
        .map(|pair| {
            let seconds = (pair[0].date - pair[1].date).num_seconds() as f64;
            (seconds / SECONDS_PER_DAY).max(0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 7, minute, 0).unwrap()
    }

    #[test]
    fn test_zero_readings_are_absent() {
        let sample = Sample::new(at(0), 0.0, 0.0, 0.0);
        assert_eq!(sample.valid_pace(), None);
        assert_eq!(sample.valid_heart_rate(), None);
        assert_eq!(sample.valid_cadence(), None);
        assert_eq!(sample.efficiency(), None);
    }

    #[test]
    fn test_non_finite_readings_are_absent() {
        assert_eq!(valid_reading(f64::NAN), None);
        assert_eq!(valid_reading(f64::INFINITY), None);
        assert_eq!(valid_reading(-5.0), None);
        assert_eq!(valid_reading(170.0), Some(170.0));
    }

    #[test]
    fn test_efficiency_index() {
        // 5:00 min/km = 12 km/h, at 150 bpm
        let efficiency = efficiency_index(300.0, 150.0).unwrap();
        assert!((efficiency - 0.08).abs() < 1e-12);
        assert_eq!(efficiency_index(300.0, 0.0), None);
        assert_eq!(efficiency_index(0.0, 150.0), None);
    }

    #[test]
    fn test_workout_efficiency_prefers_samples() {
        let mut workout = Workout::new("w1", at(0));
        workout.average_pace = 600.0;
        workout.average_heart_rate = 150.0;
        workout.samples = vec![
            Sample::new(at(0), 240.0, 150.0, 180.0),
            Sample::new(at(1), 0.0, 150.0, 180.0),
            Sample::new(at(2), 240.0, 150.0, 180.0),
        ];

        let efficiency = workout.efficiency_index().unwrap();
        assert!((efficiency - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_workout_efficiency_falls_back_to_aggregates() {
        let mut workout = Workout::new("w1", at(0));
        workout.average_pace = 600.0;
        workout.average_heart_rate = 150.0;

        let efficiency = workout.efficiency_index().unwrap();
        assert!((efficiency - 0.04).abs() < 1e-12);

        workout.average_heart_rate = 0.0;
        assert_eq!(workout.efficiency_index(), None);
    }

    #[test]
    fn test_representative_cadence() {
        let mut workout = Workout::new("w1", at(0));
        workout.average_cadence = 176.0;
        assert_eq!(workout.representative_cadence(), Some(176.0));

        workout.samples = vec![
            Sample::new(at(0), 300.0, 150.0, 170.0),
            Sample::new(at(1), 300.0, 150.0, 0.0),
            Sample::new(at(2), 300.0, 150.0, 180.0),
        ];
        assert_eq!(workout.cadences(), vec![170.0, 180.0]);
        assert_eq!(workout.representative_cadence(), Some(175.0));

        let empty = Workout::new("w2", at(0));
        assert_eq!(empty.representative_cadence(), None);
    }

    #[test]
    fn test_intervals_in_days() {
        let newest = Utc.with_ymd_and_hms(2024, 5, 10, 7, 0, 0).unwrap();
        let history = vec![
            Workout::new("c", newest),
            Workout::new("b", newest - chrono::Duration::hours(36)),
            Workout::new("a", newest - chrono::Duration::hours(84)),
        ];

        assert_eq!(intervals_in_days(&history), vec![1.5, 2.0]);
        assert!(intervals_in_days(&history[..1]).is_empty());

        let reversed: Vec<Workout> = history.iter().rev().cloned().collect();
        assert_eq!(intervals_in_days(&reversed), vec![0.0, 0.0]);
    }

    #[test]
    fn test_workout_deserializes_with_missing_aggregates() {
        let json = r#"{
            "id": "run-1",
            "date": "2024-05-01T07:00:00Z",
            "distance_km": 8.2,
            "samples": [
                { "timestamp": "2024-05-01T07:00:00Z", "pace": 310.0, "heart_rate": 148.0 }
            ]
        }"#;

        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.distance(), 8.2);
        assert_eq!(workout.average_cadence, 0.0);
        assert_eq!(workout.samples[0].valid_cadence(), None);
        assert_eq!(workout.representative_pace(), Some(310.0));
    }
}
