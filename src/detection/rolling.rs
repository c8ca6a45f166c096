//! Adaptive rolling z-score detector.
//!
//! Each sample is standardized against the mean and sample standard
//! deviation of the trailing window that ends at (and includes) the sample
//! itself. Because the window includes the current value, a single strong
//! spike inflates the window's standard deviation and can dampen its own
//! z-score; with `window = 2` no sample can ever exceed `|z| = 1/sqrt(2)`.

use super::traits::AnomalyDetector;
use crate::core::{DetectionResult, Series};
use crate::error::{DetectionError, Result};
use crate::utils::window_stats;
use tracing::debug;

/// Default trailing window length.
pub const DEFAULT_WINDOW: usize = 30;
/// Default absolute z-score threshold.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Rolling (adaptive) z-score detector.
///
/// # Example
/// ```
/// use rss_anomaly::detection::{AnomalyDetector, RollingZScore};
///
/// let detector = RollingZScore::new(2, 0.5).unwrap();
/// let result = detector
///     .detect_values(&[10.0, 10.0, 10.0, 50.0, 10.0, 10.0])
///     .unwrap();
/// assert_eq!(result.flags, vec![false, false, false, true, true, false]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RollingZScore {
    window: usize,
    threshold: f64,
}

impl RollingZScore {
    /// Create a detector with the given window length and threshold.
    pub fn new(window: usize, threshold: f64) -> Result<Self> {
        if window == 0 {
            return Err(DetectionError::InvalidParameter(
                "window must be positive".to_string(),
            ));
        }
        validate_threshold(threshold)?;
        Ok(Self { window, threshold })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Per-sample z-scores.
    ///
    /// The first `window - 1` samples lack a full window and score 0, as do
    /// samples whose window has zero variance.
    pub fn scores(&self, values: &[f64]) -> Result<Vec<f64>> {
        let mut scores = Vec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            let z = match window_stats(values, i, self.window)? {
                None => 0.0,
                Some(stats) => match stats.z_score(value) {
                    Ok(z) => z,
                    Err(DetectionError::UndefinedStatistic(_)) => 0.0,
                    Err(e) => return Err(e),
                },
            };
            scores.push(z);
        }
        Ok(scores)
    }
}

impl Default for RollingZScore {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AnomalyDetector for RollingZScore {
    fn detect_values(&self, values: &[f64]) -> Result<DetectionResult> {
        let result = DetectionResult::from_scores(self.scores(values)?, self.threshold);
        debug!(
            window = self.window,
            threshold = self.threshold,
            samples = result.len(),
            flagged = result.flagged_count(),
            "rolling z-score detection complete"
        );
        Ok(result)
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn name(&self) -> &str {
        "Rolling Z-Score"
    }
}

/// Run the rolling detector over a series.
pub fn detect_rolling(series: &Series, window: usize, threshold: f64) -> Result<DetectionResult> {
    RollingZScore::new(window, threshold)?.detect(series)
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if !(threshold > 0.0 && threshold.is_finite()) {
        return Err(DetectionError::InvalidParameter(format!(
            "threshold must be positive and finite, got {threshold}"
        )));
    }
    Ok(())
}
