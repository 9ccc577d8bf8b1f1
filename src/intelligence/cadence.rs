// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Optimal cadence band detection
//!
//! The band is the cadence span of the most efficient readings. Readings are
//! kept as (pace, cadence, heart rate) tuples from the moment they leave a
//! sample, so values from different instants are never paired.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::statistics;
use crate::config::CadenceConfig;
use crate::constants::messages;
use crate::models::{efficiency_index, valid_reading, Sample, Workout};

/// One instant's pace, cadence and heart rate, any of which may be absent (0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrideReading {
    pub pace: f64,
    pub cadence: f64,
    pub heart_rate: f64,
}

impl From<&Sample> for StrideReading {
    fn from(sample: &Sample) -> Self {
        Self {
            pace: sample.pace,
            cadence: sample.cadence,
            heart_rate: sample.heart_rate,
        }
    }
}

impl StrideReading {
    /// Pair parallel series index-wise; indices past a series' end are absent
    pub fn from_series(paces: &[f64], cadences: &[f64], heart_rates: &[f64]) -> Vec<Self> {
        let len = paces.len().max(cadences.len()).max(heart_rates.len());
        (0..len)
            .map(|i| Self {
                pace: paces.get(i).copied().unwrap_or(0.0),
                cadence: cadences.get(i).copied().unwrap_or(0.0),
                heart_rate: heart_rates.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }

    fn ranked(&self) -> Option<(f64, f64)> {
        let cadence = valid_reading(self.cadence)?;
        let efficiency = efficiency_index(self.pace, self.heart_rate)?;
        Some((cadence, efficiency))
    }
}

/// Outcome of a cadence analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceResult {
    /// Mean of valid cadence readings (0 when none)
    pub current_average: f64,
    /// Inclusive (low, high) band in steps per minute
    pub optimal_range: (f64, f64),
    /// Share of valid cadence readings inside the band, in percent
    pub in_range_percentage: f64,
    /// True when the reference band was used for lack of efficiency data
    pub used_default_band: bool,
    pub recommendation: String,
}

/// Derives the cadence band associated with the best observed efficiency
#[derive(Debug, Clone, Default)]
pub struct CadenceOptimizer {
    config: CadenceConfig,
}

impl CadenceOptimizer {
    pub fn new(config: CadenceConfig) -> Self {
        Self { config }
    }

    pub fn analyze_workout(&self, workout: &Workout) -> CadenceResult {
        self.analyze_workouts(std::slice::from_ref(workout))
    }

    /// Pool every sample of every workout, keeping each sample's tuple intact
    ///
    /// A workout without cadence samples contributes its average cadence to the
    /// current average and in-range share, but never to the efficiency ranking.
    pub fn analyze_workouts(&self, workouts: &[Workout]) -> CadenceResult {
        let ranked: Vec<(f64, f64)> = workouts
            .iter()
            .flat_map(|w| w.samples.iter().map(StrideReading::from))
            .filter_map(|r| r.ranked())
            .collect();
        let cadences: Vec<f64> = workouts
            .iter()
            .flat_map(|w| {
                let from_samples = w.cadences();
                if from_samples.is_empty() {
                    w.representative_cadence().into_iter().collect()
                } else {
                    from_samples
                }
            })
            .collect();
        self.summarize(&cadences, &ranked)
    }

    pub fn analyze_series(&self, paces: &[f64], cadences: &[f64], heart_rates: &[f64]) -> CadenceResult {
        self.analyze_readings(&StrideReading::from_series(paces, cadences, heart_rates))
    }

    pub fn analyze_readings(&self, readings: &[StrideReading]) -> CadenceResult {
        let cadences: Vec<f64> = readings
            .iter()
            .filter_map(|r| valid_reading(r.cadence))
            .collect();
        let ranked: Vec<(f64, f64)> = readings.iter().filter_map(StrideReading::ranked).collect();
        self.summarize(&cadences, &ranked)
    }

    /// `cadences` are valid readings, `ranked` are (cadence, efficiency) pairs
    fn summarize(&self, cadences: &[f64], ranked: &[(f64, f64)]) -> CadenceResult {
        let current_average = statistics::mean(cadences).unwrap_or(0.0);

        let (optimal_range, used_default_band) = match self.optimal_band(ranked) {
            Some(band) => (band, false),
            None => (
                (self.config.default_band_low, self.config.default_band_high),
                true,
            ),
        };

        let (low, high) = optimal_range;
        let in_range_percentage = if cadences.is_empty() {
            0.0
        } else {
            let inside = cadences.iter().filter(|c| (low..=high).contains(*c)).count();
            inside as f64 * 100.0 / cadences.len() as f64
        };

        let recommendation = if cadences.is_empty() {
            messages::CADENCE_NO_DATA
        } else if current_average < low {
            messages::CADENCE_LOW
        } else if current_average > high {
            messages::CADENCE_HIGH
        } else {
            messages::CADENCE_IN_RANGE
        };

        debug!(
            cadence_samples = cadences.len(),
            ranked_samples = ranked.len(),
            low,
            high,
            used_default_band,
            "Cadence band computed"
        );

        CadenceResult {
            current_average,
            optimal_range,
            in_range_percentage,
            used_default_band,
            recommendation: recommendation.to_string(),
        }
    }

    /// Cadence span of readings at or above the configured efficiency percentile
    fn optimal_band(&self, ranked: &[(f64, f64)]) -> Option<(f64, f64)> {
        if ranked.len() < self.config.min_samples_for_optimal_range {
            return None;
        }

        let efficiencies: Vec<f64> = ranked.iter().map(|(_, e)| *e).collect();
        let cutoff = statistics::percentile(&efficiencies, self.config.optimal_percentile)?;

        let (low, high) = ranked
            .iter()
            .filter(|(_, e)| *e >= cutoff)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (c, _)| {
                (lo.min(*c), hi.max(*c))
            });
        if !low.is_finite() || !high.is_finite() {
            return None;
        }

        if high - low < self.config.min_band_width {
            let center = (low + high) / 2.0;
            let half = self.config.min_band_width / 2.0;
            return Some((center - half, center + half));
        }
        Some((low, high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_only_falls_back_to_default_band() {
        let optimizer = CadenceOptimizer::default();
        let result = optimizer.analyze_series(&[], &[175.0; 6], &[]);

        assert_eq!(result.optimal_range, (170.0, 180.0));
        assert!(result.used_default_band);
        assert_eq!(result.current_average, 175.0);
        assert_eq!(result.in_range_percentage, 100.0);
        assert_eq!(result.recommendation, messages::CADENCE_IN_RANGE);
    }

    #[test]
    fn test_no_valid_samples() {
        let optimizer = CadenceOptimizer::default();
        let result = optimizer.analyze_series(&[300.0, 0.0], &[0.0, 0.0], &[150.0]);

        assert_eq!(result.optimal_range, (170.0, 180.0));
        assert_eq!(result.current_average, 0.0);
        assert_eq!(result.in_range_percentage, 0.0);
        assert_eq!(result.recommendation, messages::CADENCE_NO_DATA);
    }

    #[test]
    fn test_band_from_most_efficient_readings() {
        let optimizer = CadenceOptimizer::default();
        let cadences = [160.0, 164.0, 168.0, 172.0, 176.0, 178.0, 180.0, 184.0];
        let paces = [330.0, 320.0, 310.0, 300.0, 280.0, 282.0, 285.0, 305.0];
        let heart_rates = [150.0; 8];

        let result = optimizer.analyze_series(&paces, &cadences, &heart_rates);

        // Top quartile is the 176 and 178 readings, widened to the minimum width
        assert!(!result.used_default_band);
        assert_eq!(result.optimal_range, (175.0, 179.0));
        assert_eq!(result.in_range_percentage, 25.0);
        assert_eq!(result.current_average, 172.75);
        assert_eq!(result.recommendation, messages::CADENCE_LOW);
    }

    #[test]
    fn test_readings_are_not_mispaired() {
        let optimizer = CadenceOptimizer::default();
        // Cadence missing where pace is fastest: that reading cannot rank
        let readings = StrideReading::from_series(
            &[250.0, 300.0, 300.0],
            &[0.0, 170.0, 172.0],
            &[150.0, 150.0, 150.0],
        );

        assert_eq!(readings[0].ranked(), None);
        assert!(readings[1].ranked().is_some());

        let result = optimizer.analyze_readings(&readings);
        assert!(result.used_default_band);
        assert_eq!(result.current_average, 171.0);
    }

    #[test]
    fn test_workouts_are_pooled() {
        use chrono::{TimeZone, Utc};

        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let mut first = Workout::new("a", date);
        first.samples = vec![Sample::new(date, 300.0, 150.0, 186.0)];
        let mut second = Workout::new("b", date);
        second.samples = vec![Sample::new(date, 0.0, 0.0, 184.0)];

        let result = CadenceOptimizer::default().analyze_workouts(&[first, second]);
        assert_eq!(result.current_average, 185.0);
        assert_eq!(result.in_range_percentage, 0.0);
        assert_eq!(result.recommendation, messages::CADENCE_HIGH);
    }

    #[test]
    fn test_aggregate_cadence_without_samples() {
        use chrono::{TimeZone, Utc};

        let date = Utc.with_ymd_and_hms(2024, 2, 11, 9, 0, 0).unwrap();
        let mut aggregate_only = Workout::new("a", date);
        aggregate_only.average_cadence = 168.0;
        let mut sampled = Workout::new("b", date);
        sampled.average_cadence = 150.0;
        sampled.samples = vec![Sample::new(date, 0.0, 0.0, 172.0); 3];

        let optimizer = CadenceOptimizer::default();
        let result = optimizer.analyze_workouts(&[aggregate_only.clone(), sampled]);

        // Sample readings win over the sampled workout's own average
        assert_eq!(result.current_average, 171.0);
        assert_eq!(result.in_range_percentage, 75.0);
        assert!(result.used_default_band);

        let single = optimizer.analyze_workout(&aggregate_only);
        assert_eq!(single.current_average, 168.0);
        assert_eq!(single.recommendation, messages::CADENCE_LOW);
    }

    #[test]
    fn test_wide_band_is_kept() {
        let config = CadenceConfig {
            min_samples_for_optimal_range: 4,
            optimal_percentile: 50.0,
            ..CadenceConfig::default()
        };
        let optimizer = CadenceOptimizer::new(config);
        let result = optimizer.analyze_series(
            &[280.0, 290.0, 330.0, 340.0],
            &[168.0, 182.0, 160.0, 190.0],
            &[150.0, 150.0, 150.0, 150.0],
        );

        assert_eq!(result.optimal_range, (168.0, 182.0));
        assert_eq!(result.in_range_percentage, 50.0);
    }
}
