// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Heart rate zone distribution for a single workout

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ZoneThresholds;
use crate::models::{valid_reading, Sample, Workout};

/// Share of heart rate samples per zone, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDistribution {
    pub zone1_recovery: f64,
    pub zone2_endurance: f64,
    pub zone3_tempo: f64,
    pub zone4_threshold: f64,
    pub zone5_vo2max: f64,
    /// Number of valid heart rate samples distributed
    pub sample_count: usize,
}

/// Buckets heart rate samples by percentage of maximum heart rate
#[derive(Debug, Clone, Default)]
pub struct HeartRateZoneAnalyzer {
    thresholds: ZoneThresholds,
}

impl HeartRateZoneAnalyzer {
    pub fn new(thresholds: ZoneThresholds) -> Self {
        Self { thresholds }
    }

    pub fn analyze_workout(&self, workout: &Workout, max_heart_rate: f64) -> ZoneDistribution {
        self.analyze(&workout.samples, max_heart_rate)
    }

    /// All zeros when there are no valid samples or `max_heart_rate` is absent
    pub fn analyze(&self, samples: &[Sample], max_heart_rate: f64) -> ZoneDistribution {
        let Some(max_hr) = valid_reading(max_heart_rate) else {
            return ZoneDistribution::default();
        };

        let mut counts = [0usize; 5];
        for hr in samples.iter().filter_map(Sample::valid_heart_rate) {
            counts[self.zone_index(hr / max_hr * 100.0)] += 1;
        }

        let total: usize = counts.iter().sum();
        if total == 0 {
            return ZoneDistribution::default();
        }

        let pct = |count: usize| count as f64 * 100.0 / total as f64;
        debug!(samples = total, max_hr, "Heart rate zones distributed");

        ZoneDistribution {
            zone1_recovery: pct(counts[0]),
            zone2_endurance: pct(counts[1]),
            zone3_tempo: pct(counts[2]),
            zone4_threshold: pct(counts[3]),
            zone5_vo2max: pct(counts[4]),
            sample_count: total,
        }
    }

    fn zone_index(&self, percent_of_max: f64) -> usize {
        let t = &self.thresholds;
        match percent_of_max {
            p if p < t.recovery_max => 0,
            p if p < t.endurance_max => 1,
            p if p < t.tempo_max => 2,
            p if p < t.threshold_max => 3,
            _ => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn hr_samples(heart_rates: &[f64]) -> Vec<Sample> {
        let start = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        heart_rates
            .iter()
            .enumerate()
            .map(|(i, hr)| Sample::new(start + Duration::seconds(i as i64), 300.0, *hr, 170.0))
            .collect()
    }

    #[test]
    fn test_zone_distribution() {
        let analyzer = HeartRateZoneAnalyzer::default();
        // Max 200: 110 -> z1, 130 -> z2, 150 -> z3, 170 -> z4, 190 -> z5
        let result = analyzer.analyze(&hr_samples(&[110.0, 130.0, 150.0, 170.0, 190.0]), 200.0);

        assert_eq!(result.sample_count, 5);
        assert_eq!(result.zone1_recovery, 20.0);
        assert_eq!(result.zone2_endurance, 20.0);
        assert_eq!(result.zone3_tempo, 20.0);
        assert_eq!(result.zone4_threshold, 20.0);
        assert_eq!(result.zone5_vo2max, 20.0);
    }

    #[test]
    fn test_distribution_sums_to_hundred() {
        let analyzer = HeartRateZoneAnalyzer::default();
        let result = analyzer.analyze(&hr_samples(&[120.0, 125.0, 0.0, 141.0, 160.0, 185.0, 199.0]), 195.0);

        let total = result.zone1_recovery
            + result.zone2_endurance
            + result.zone3_tempo
            + result.zone4_threshold
            + result.zone5_vo2max;
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(result.sample_count, 6);
    }

    #[test]
    fn test_missing_max_heart_rate() {
        let analyzer = HeartRateZoneAnalyzer::default();
        let result = analyzer.analyze(&hr_samples(&[140.0, 150.0]), 0.0);

        assert_eq!(result, ZoneDistribution::default());
    }

    #[test]
    fn test_no_heart_rate_samples() {
        let analyzer = HeartRateZoneAnalyzer::default();
        let result = analyzer.analyze(&hr_samples(&[0.0, 0.0]), 190.0);

        assert_eq!(result.sample_count, 0);
        assert_eq!(result.zone2_endurance, 0.0);
    }
}
