//! RSS anomaly analysis example.
//!
//! Builds a synthetic three-segment RSS series (normal, injected leak,
//! recovery), runs both detectors, and prints their scores.
//!
//! Run with: RUST_LOG=debug cargo run --example rss_analysis

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rss_anomaly::analysis::{analyze, AnalysisConfig, DetectorReport};
use rss_anomaly::core::Series;
use tracing_subscriber::EnvFilter;

fn print_report(report: &DetectorReport) {
    let m = &report.metrics;
    println!("\n--- {} ---", report.name);
    println!("Threshold: {:.2}", report.result.threshold);
    println!(
        "Nominal false-alarm rate: {:.4}%",
        100.0 * report.nominal_false_alarm_rate
    );
    println!("Detected: {}", report.result.flagged_count());
    println!("Precision: {:.4}", m.precision);
    println!("Recall: {:.4}", m.recall);
    println!("F1: {:.4}", m.f1);
    let [[tn, fp], [fn_, tp]] = m.confusion.as_matrix();
    println!("Confusion Matrix:");
    println!("  [[{tn:>5} {fp:>5}]");
    println!("   [{fn_:>5} {tp:>5}]]");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== RSS Anomaly Analysis ===\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let level = 245_000.0;

    let normal: Vec<f64> = (0..300)
        .map(|_| level + rng.gen_range(-400.0..400.0))
        .collect();
    // Leak: RSS climbs steadily while the anomaly is injected.
    let leak: Vec<f64> = (0..80)
        .map(|i| level + 1_500.0 + 180.0 * i as f64 + rng.gen_range(-400.0..400.0))
        .collect();
    let recovery: Vec<f64> = (0..150)
        .map(|_| level + rng.gen_range(-400.0..400.0))
        .collect();

    let series = Series::from_segments(&normal, &leak, &recovery)?;
    println!("Total samples: {}", series.len());
    if let Some(range) = series.anomaly_range() {
        println!("Injected anomaly: [{}, {})", range.start, range.end);
    }

    let config = match std::env::var("RSS_ANALYSIS_CONFIG") {
        Ok(json) => AnalysisConfig::from_json(&json)?,
        Err(_) => AnalysisConfig::default(),
    };
    println!("Config: window={}, threshold={}", config.window, config.threshold);

    let reference = series.segments()[0].range.clone();
    let report = analyze(&series, reference, &config)?;

    println!(
        "\nBaseline: mean={:.2} KB, std={:.2} KB",
        report.baseline.mean, report.baseline.std
    );

    print_report(&report.rolling);
    print_report(&report.frozen);

    println!("\nFrozen detected regions:");
    for region in &report.frozen_regions {
        println!("  [{}, {}) ({} samples)", region.start, region.end, region.len());
    }

    Ok(())
}
