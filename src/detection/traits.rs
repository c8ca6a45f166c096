//! AnomalyDetector trait defining the common interface for all detectors.

use crate::core::{DetectionResult, Series};
use crate::error::Result;

/// Common interface for z-score anomaly detectors.
///
/// Detectors are configured and validated at construction, hold no mutable
/// state, and may be shared across threads. This trait is object-safe and
/// can be used with `Box<dyn AnomalyDetector>`.
pub trait AnomalyDetector {
    /// Score and flag every value.
    fn detect_values(&self, values: &[f64]) -> Result<DetectionResult>;

    /// Score and flag every sample of a series.
    fn detect(&self, series: &Series) -> Result<DetectionResult> {
        self.detect_values(series.values())
    }

    /// Threshold the absolute z-score must exceed.
    fn threshold(&self) -> f64;

    /// Get the detector name.
    fn name(&self) -> &str;
}

/// Type alias for boxed detector trait objects.
///
/// # Example
///
/// ```
/// use rss_anomaly::detection::{AnomalyDetector, BoxedDetector, RollingZScore};
///
/// let detector: BoxedDetector = Box::new(RollingZScore::default());
/// assert_eq!(detector.name(), "Rolling Z-Score");
/// ```
pub type BoxedDetector = Box<dyn AnomalyDetector + Send + Sync>;
