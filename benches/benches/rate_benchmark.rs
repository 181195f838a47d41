//! Benchmarks for the probe's per-chunk rate math.
//!
//! Run with: `cargo bench --package netsonde-bench`
//!
//! The plateau check runs once per second inside the read loop, over every
//! measurement taken so far; these benchmarks size it against realistic
//! sequences (a 25-second probe at 400 chunks/second is 10,000 samples).

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use netsonde_bench::{constant_rate_measurements, ramp_measurements};
use netsonde_rate::{BUCKET_MILLIS, PlateauDetector, SpanMode, bucket_rates, peak_rate};

fn rate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate");

    for &seconds in &[10u64, 25, 60] {
        let measurements = constant_rate_measurements(seconds, 8.0, 400);
        group.throughput(Throughput::Elements(measurements.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("bucket_rates", seconds),
            &measurements,
            |b, m| {
                b.iter(|| bucket_rates(m, SpanMode::Fixed(BUCKET_MILLIS)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("peak_rate", seconds),
            &measurements,
            |b, m| {
                b.iter(|| peak_rate(m));
            },
        );
    }

    group.finish();
}

fn plateau_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("plateau");

    let profiles = [
        ("flat", constant_rate_measurements(25, 8.0, 400)),
        ("ramp", ramp_measurements(25, 1.0, 10.0, 400)),
    ];

    for (name, measurements) in &profiles {
        group.throughput(Throughput::Elements(measurements.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("should_stop", name),
            measurements,
            |b, m| {
                b.iter(|| {
                    let mut detector = PlateauDetector::new();
                    detector.should_stop(m, 25_000)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, rate_benchmark, plateau_benchmark);
criterion_main!(benches);
