//! Frozen-baseline z-score detector.
//!
//! The baseline mean and standard deviation are computed once, by the
//! caller, from a reference subsequence assumed to be anomaly-free, and are
//! never updated while scoring. A baseline with zero (or non-finite)
//! standard deviation is rejected with `UndefinedStatistic` when the
//! detector is constructed, so no z-score is ever a NaN.

use super::rolling::{validate_threshold, DEFAULT_THRESHOLD};
use super::traits::AnomalyDetector;
use crate::core::{DetectionResult, Series};
use crate::error::{DetectionError, Result};
use crate::utils::{mean, std_dev, z_score};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reference mean and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub mean: f64,
    pub std: f64,
}

impl Baseline {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Compute the baseline from a reference subsequence.
    ///
    /// Uses the sample standard deviation (n-1 denominator), so at least two
    /// values are required. A constant reference yields `std == 0.0`, which
    /// [`FrozenBaseline::new`] then rejects.
    pub fn from_reference(values: &[f64]) -> Result<Self> {
        let mean = mean(values).ok_or(DetectionError::EmptyData)?;
        let std = std_dev(values).ok_or(DetectionError::InsufficientData {
            needed: 2,
            got: values.len(),
        })?;
        Ok(Self { mean, std })
    }
}

/// Frozen-baseline z-score detector.
///
/// # Example
/// ```
/// use rss_anomaly::detection::{AnomalyDetector, Baseline, FrozenBaseline};
///
/// let baseline = Baseline::from_reference(&[100.0, 102.0, 98.0, 100.0]).unwrap();
/// let detector = FrozenBaseline::new(baseline, 3.0).unwrap();
/// let result = detector.detect_values(&[101.0, 150.0, 99.0]).unwrap();
/// assert_eq!(result.flags, vec![false, true, false]);
///
/// let constant = Baseline::from_reference(&[10.0, 10.0, 10.0, 10.0]).unwrap();
/// assert!(FrozenBaseline::new(constant, 3.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenBaseline {
    baseline: Baseline,
    threshold: f64,
}

impl FrozenBaseline {
    /// Create a detector against a fixed baseline.
    ///
    /// Returns `UndefinedStatistic` if the baseline standard deviation is
    /// zero, negative or non-finite, or if its mean is non-finite.
    pub fn new(baseline: Baseline, threshold: f64) -> Result<Self> {
        validate_threshold(threshold)?;
        if !(baseline.std > 0.0 && baseline.std.is_finite()) {
            return Err(DetectionError::UndefinedStatistic(format!(
                "baseline standard deviation must be positive and finite, got {}",
                baseline.std
            )));
        }
        if !baseline.mean.is_finite() {
            return Err(DetectionError::UndefinedStatistic(format!(
                "baseline mean must be finite, got {}",
                baseline.mean
            )));
        }
        Ok(Self {
            baseline,
            threshold,
        })
    }

    /// Create a detector with the default threshold of 3.
    pub fn with_default_threshold(baseline: Baseline) -> Result<Self> {
        Self::new(baseline, DEFAULT_THRESHOLD)
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Per-sample z-scores against the baseline.
    pub fn scores(&self, values: &[f64]) -> Result<Vec<f64>> {
        values
            .iter()
            .map(|&v| z_score(v, self.baseline.mean, self.baseline.std))
            .collect()
    }
}

impl AnomalyDetector for FrozenBaseline {
    fn detect_values(&self, values: &[f64]) -> Result<DetectionResult> {
        let result = DetectionResult::from_scores(self.scores(values)?, self.threshold);
        debug!(
            baseline_mean = self.baseline.mean,
            baseline_std = self.baseline.std,
            threshold = self.threshold,
            samples = result.len(),
            flagged = result.flagged_count(),
            "frozen baseline detection complete"
        );
        Ok(result)
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn name(&self) -> &str {
        "Frozen Baseline"
    }
}

/// Run the frozen-baseline detector over a series.
pub fn detect_frozen(
    series: &Series,
    baseline_mean: f64,
    baseline_std: f64,
    threshold: f64,
) -> Result<DetectionResult> {
    FrozenBaseline::new(Baseline::new(baseline_mean, baseline_std), threshold)?.detect(series)
}
