//! # rss-anomaly
//!
//! Z-score anomaly detection for resident-memory (RSS) series, with
//! scoring against ground-truth labels.
//!
//! Provides an adaptive rolling z-score detector and a frozen-baseline
//! z-score detector, a collapser that turns per-sample flags into
//! contiguous regions, and precision/recall/F1 evaluation. Numeric edge
//! cases (insufficient history, zero variance, empty denominators) are
//! resolved by explicit policy rather than by NaN propagation.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod core;
pub mod detection;
pub mod error;
pub mod utils;

pub use error::{DetectionError, Result};

pub mod prelude {
    pub use crate::analysis::{analyze, AnalysisConfig, AnalysisReport};
    pub use crate::core::{DetectionResult, Series};
    pub use crate::detection::{
        collapse, AnomalyDetector, Baseline, FrozenBaseline, Region, RollingZScore,
    };
    pub use crate::error::{DetectionError, Result};
    pub use crate::utils::{evaluate, ClassificationMetrics, ConfusionMatrix};
}
