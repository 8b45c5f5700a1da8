//! Per-driver reductions over unordered timing samples
//!
//! Each reduction is an independent single pass. Nothing here orders drivers
//! relative to each other; that is the classification builders' job.

use std::collections::HashMap;
use tracing::trace;

use crate::types::{IntervalSample, LapSample, PositionSample, TimedSample};

/// Latest sample per driver, in first-encounter order of drivers.
///
/// Equal timestamps resolve to the sample seen last.
pub fn latest_by_driver<S: TimedSample>(samples: &[S]) -> Vec<&S> {
    let mut latest: Vec<&S> = Vec::new();
    let mut slots: HashMap<u32, usize> = HashMap::new();

    for sample in samples {
        match slots.get(&sample.driver_number()) {
            Some(&slot) => {
                if sample.timestamp() >= latest[slot].timestamp() {
                    latest[slot] = sample;
                }
            }
            None => {
                slots.insert(sample.driver_number(), latest.len());
                latest.push(sample);
            }
        }
    }

    trace!(samples = samples.len(), drivers = latest.len(), "Reduced samples to latest per driver");
    latest
}

/// Final running position of every driver.
pub fn latest_positions(positions: &[PositionSample]) -> Vec<&PositionSample> {
    latest_by_driver(positions)
}

/// Most recent interval row per driver.
pub fn latest_intervals(intervals: &[IntervalSample]) -> HashMap<u32, &IntervalSample> {
    latest_by_driver(intervals).into_iter().map(|s| (s.driver_number, s)).collect()
}

/// Sum of valid lap durations per driver. Missing or zero durations add nothing.
pub fn cumulative_times(laps: &[LapSample]) -> HashMap<u32, f64> {
    let mut totals: HashMap<u32, f64> = HashMap::new();
    for lap in laps {
        if let Some(duration) = lap.valid_duration() {
            *totals.entry(lap.driver_number).or_insert(0.0) += duration;
        }
    }
    totals
}

/// Minimum strictly-positive lap duration per driver.
pub fn fastest_laps(laps: &[LapSample]) -> HashMap<u32, f64> {
    let mut fastest: HashMap<u32, f64> = HashMap::new();
    for lap in laps {
        if let Some(duration) = lap.valid_duration() {
            fastest
                .entry(lap.driver_number)
                .and_modify(|best| *best = best.min(duration))
                .or_insert(duration);
        }
    }
    fastest
}

/// Lap-derived reductions for one session.
#[derive(Debug, Clone, Default)]
pub struct LapSummary {
    cumulative: HashMap<u32, f64>,
    fastest: HashMap<u32, f64>,
}

impl LapSummary {
    pub fn from_laps(laps: &[LapSample]) -> Self {
        Self { cumulative: cumulative_times(laps), fastest: fastest_laps(laps) }
    }

    /// Summary used when lap data is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cumulative(&self, driver_number: u32) -> Option<f64> {
        self.cumulative.get(&driver_number).copied()
    }

    pub fn fastest(&self, driver_number: u32) -> Option<f64> {
        self.fastest.get(&driver_number).copied()
    }

    /// Smallest cumulative time of any driver; the reference for race gaps.
    pub fn leader_total(&self) -> Option<f64> {
        self.cumulative.values().copied().min_by(f64::total_cmp)
    }

    /// Drivers with a valid lap, quickest first. Ties order by race number.
    pub fn ranked_by_fastest(&self) -> Vec<(u32, f64)> {
        let mut ranked: Vec<(u32, f64)> = self.fastest.iter().map(|(&n, &t)| (n, t)).collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty() && self.fastest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{interval, lap, position};
    use proptest::prelude::*;

    #[test]
    fn fastest_lap_ignores_non_positive_durations() {
        let laps =
            vec![lap(1, Some(1.0)), lap(1, Some(0.0)), lap(1, Some(-5.0)), lap(1, Some(0.5))];
        assert_eq!(fastest_laps(&laps).get(&1), Some(&0.5));
    }

    #[test]
    fn cumulative_sums_only_present_durations() {
        let laps = vec![lap(1, Some(90.1)), lap(1, None), lap(1, Some(89.9))];
        let total = cumulative_times(&laps)[&1];
        assert!((total - 180.0).abs() < 1e-9);
    }

    #[test]
    fn drivers_without_valid_laps_have_no_entry() {
        let laps = vec![lap(44, None), lap(44, Some(0.0))];
        let summary = LapSummary::from_laps(&laps);
        assert_eq!(summary.fastest(44), None);
        assert_eq!(summary.cumulative(44), None);
        assert!(summary.is_empty());
    }

    #[test]
    fn latest_position_uses_max_timestamp_not_arrival_order() {
        let positions = vec![
            position(81, "2025-04-13T16:55:00Z", 1),
            position(4, "2025-04-13T15:00:05Z", 1),
            position(81, "2025-04-13T15:00:05Z", 2),
            position(4, "2025-04-13T16:55:00Z", 2),
        ];
        let latest = latest_positions(&positions);

        let reduced: Vec<(u32, u32)> = latest.iter().map(|p| (p.driver_number, p.position)).collect();
        assert_eq!(reduced, vec![(81, 1), (4, 2)]);
    }

    #[test]
    fn equal_timestamps_resolve_to_last_seen() {
        let positions = vec![
            position(16, "2025-04-13T16:00:00Z", 3),
            position(16, "2025-04-13T16:00:00Z", 4),
        ];
        assert_eq!(latest_positions(&positions)[0].position, 4);
    }

    #[test]
    fn latest_interval_per_driver() {
        let intervals = vec![
            interval(1, "2025-04-13T16:54:00Z", Some(11.0)),
            interval(1, "2025-04-13T16:55:00Z", Some(12.345)),
            interval(4, "2025-04-13T16:50:00Z", None),
        ];
        let latest = latest_intervals(&intervals);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[&1].date, "2025-04-13T16:55:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap());
    }

    #[test]
    fn ranking_breaks_ties_by_driver_number() {
        let laps = vec![lap(16, Some(92.0)), lap(4, Some(92.0)), lap(1, Some(91.5))];
        let ranked = LapSummary::from_laps(&laps).ranked_by_fastest();
        assert_eq!(ranked.iter().map(|(n, _)| *n).collect::<Vec<_>>(), vec![1, 4, 16]);
    }

    proptest! {
        #[test]
        fn prop_fastest_is_minimum_positive_duration(
            durations in prop::collection::vec(prop::option::of(-10.0f64..200.0), 1..40)
        ) {
            let laps: Vec<LapSample> = durations.iter().map(|d| lap(7, *d)).collect();
            let expected = durations
                .iter()
                .flatten()
                .copied()
                .filter(|d| *d > 0.0)
                .min_by(f64::total_cmp);

            prop_assert_eq!(fastest_laps(&laps).get(&7).copied(), expected);
        }

        #[test]
        fn prop_latest_keeps_one_sample_per_driver(
            rows in prop::collection::vec((1u32..25, 0i64..10_000, 1u32..21), 0..80)
        ) {
            let base: chrono::DateTime<chrono::Utc> = "2025-04-13T15:00:00Z".parse().unwrap();
            let positions: Vec<PositionSample> = rows
                .iter()
                .map(|(driver, offset, pos)| PositionSample {
                    driver_number: *driver,
                    date: base + chrono::Duration::seconds(*offset),
                    position: *pos,
                    session_key: None,
                })
                .collect();

            let latest = latest_positions(&positions);
            let mut seen = std::collections::HashSet::new();
            for sample in &latest {
                prop_assert!(seen.insert(sample.driver_number));
                let newest = positions
                    .iter()
                    .filter(|p| p.driver_number == sample.driver_number)
                    .map(|p| p.date)
                    .max()
                    .unwrap();
                prop_assert_eq!(sample.date, newest);
            }
        }
    }
}
