//! Utility functions shared by the detectors and the evaluator.

pub mod metrics;
pub mod stats;

pub use metrics::{evaluate, evaluate_flags, ClassificationMetrics, ConfusionMatrix};
pub use stats::{
    mean, nominal_false_alarm_rate, std_dev, variance, window_stats, z_score, WindowStats,
};
