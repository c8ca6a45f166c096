//! Benchmarks for the rolling and frozen detectors and the evaluation path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rss_anomaly::analysis::{analyze, AnalysisConfig};
use rss_anomaly::core::Series;
use rss_anomaly::detection::{collapse, AnomalyDetector, Baseline, FrozenBaseline, RollingZScore};
use rss_anomaly::utils::evaluate;

fn generate_rss(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| 80_000.0 + 500.0 * (i as f64 / 50.0).sin() + rng.gen_range(-100.0..100.0))
        .collect()
}

fn bench_detectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("detectors");

    for size in [1_000, 10_000, 100_000].iter() {
        let values = generate_rss(*size);
        let baseline = Baseline::from_reference(&values[..*size / 4]).unwrap();

        for window in [30, 120].iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("rolling_w{window}"), size),
                size,
                |b, _| {
                    let detector = RollingZScore::new(*window, 3.0).unwrap();
                    b.iter(|| detector.detect_values(black_box(&values)))
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("frozen", size), size, |b, _| {
            let detector = FrozenBaseline::new(baseline, 3.0).unwrap();
            b.iter(|| detector.detect_values(black_box(&values)))
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    let n = 10_000;
    let values = generate_rss(n);
    let truth: Vec<bool> = (0..n).map(|i| (4_000..6_000).contains(&i)).collect();
    let detector = FrozenBaseline::new(Baseline::new(80_000.0, 200.0), 3.0).unwrap();
    let result = detector.detect_values(&values).unwrap();

    group.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(&result), black_box(&truth)))
    });

    group.bench_function("collapse", |b| {
        b.iter(|| collapse(black_box(&result.flags)).count())
    });

    let series = Series::new(values, truth).unwrap();
    group.bench_function("analyze", |b| {
        b.iter(|| analyze(black_box(&series), 0..2_000, &AnalysisConfig::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_detectors, bench_scoring);
criterion_main!(benches);
