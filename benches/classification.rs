//! Benchmarks for classification building
//!
//! Measures the per-driver reductions and the race builder on a synthetic
//! full-distance race: 20 drivers, 57 laps, one position and interval sample
//! per driver every few seconds.
//!
//! Platform: Cross-platform (no network, CI-safe)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use paddock::aggregate::{LapSummary, latest_positions};
use paddock::classify::{self, RaceInputs};
use paddock::test_utils::{driver, interval, lap, position, session};
use paddock::types::{DriverLookup, IntervalSample, LapSample, PositionSample};
use paddock::MissingDriverPolicy;
use std::hint::black_box;

const DRIVERS: u32 = 20;
const LAPS: u32 = 57;

/// Synthetic race telemetry with `samples_per_driver` position/interval rows.
fn race_data(samples_per_driver: u32) -> (Vec<PositionSample>, Vec<LapSample>, Vec<IntervalSample>) {
    let mut positions = Vec::new();
    let mut intervals = Vec::new();
    for sample in 0..samples_per_driver {
        let date = format!(
            "2025-04-13T{:02}:{:02}:{:02}Z",
            15 + sample / 3600,
            (sample / 60) % 60,
            sample % 60
        );
        for number in 1..=DRIVERS {
            // Rotate order so the latest sample decides the result
            let place = (number + sample) % DRIVERS + 1;
            positions.push(position(number, &date, place));
            intervals.push(interval(number, &date, Some(f64::from(place) * 1.7)));
        }
    }

    let laps = (1..=DRIVERS)
        .flat_map(|number| {
            (0..LAPS).map(move |n| {
                lap(number, Some(94.0 + f64::from(number) * 0.05 + f64::from(n % 3) * 0.1))
            })
        })
        .collect();

    (positions, laps, intervals)
}

fn grid() -> DriverLookup {
    DriverLookup::new((1..=DRIVERS).map(|n| driver(n, &format!("Driver {n}"), "Team")).collect())
}

fn bench_reductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("reductions");

    for samples in [60u32, 600, 3600] {
        let (positions, laps, _) = race_data(samples);
        group.throughput(Throughput::Elements(positions.len() as u64));
        group.bench_with_input(BenchmarkId::new("latest_positions", samples), &positions, |b, p| {
            b.iter(|| black_box(latest_positions(black_box(p)).len()))
        });
        group.bench_with_input(BenchmarkId::new("lap_summary", samples), &laps, |b, l| {
            b.iter(|| black_box(LapSummary::from_laps(black_box(l))))
        });
    }

    group.finish();
}

fn bench_race_builder(c: &mut Criterion) {
    let (positions, laps, intervals) = race_data(3600);
    let drivers = grid();
    let summary = LapSummary::from_laps(&laps);
    let race = session(9005, "Race", "Race", "2025-04-13T15:00:00Z");

    let mut group = c.benchmark_group("race_builder");
    group.bench_function("full_distance", |b| {
        b.iter(|| {
            let inputs = RaceInputs {
                positions: black_box(&positions),
                drivers: &drivers,
                laps: &summary,
                intervals: black_box(&intervals),
            };
            black_box(classify::race(&race, inputs, MissingDriverPolicy::Drop))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_reductions, bench_race_builder);
criterion_main!(benches);
