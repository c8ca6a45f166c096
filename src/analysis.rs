//! End-to-end comparison of the rolling and frozen-baseline detectors.
//!
//! Runs both detectors over one labeled series, scores each against the
//! series' ground truth, and collapses the frozen detector's flags into
//! regions for region-based reporting.

use crate::core::{DetectionResult, Series};
use crate::detection::{
    collapse, AnomalyDetector, Baseline, FrozenBaseline, Region, RollingZScore, DEFAULT_THRESHOLD,
    DEFAULT_WINDOW,
};
use crate::error::{DetectionError, Result};
use crate::utils::{evaluate, nominal_false_alarm_rate, ClassificationMetrics};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, info};

/// Configuration shared by both detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trailing window length for the rolling detector.
    pub window: usize,
    /// Absolute z-score threshold.
    pub threshold: f64,
    /// Threshold for the frozen detector, if it should differ from `threshold`.
    pub frozen_threshold: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
            frozen_threshold: None,
        }
    }
}

impl AnalysisConfig {
    pub fn new(window: usize, threshold: f64) -> Self {
        Self {
            window,
            threshold,
            frozen_threshold: None,
        }
    }

    /// Use a separate threshold for the frozen detector.
    pub fn with_frozen_threshold(mut self, threshold: f64) -> Self {
        self.frozen_threshold = Some(threshold);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Example
    /// ```
    /// use rss_anomaly::analysis::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::from_json(r#"{ "window": 60 }"#).unwrap();
    /// assert_eq!(config.window, 60);
    /// assert_eq!(config.threshold, 3.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DetectionError::InvalidParameter(format!("invalid config: {e}")))
    }

    fn effective_frozen_threshold(&self) -> f64 {
        self.frozen_threshold.unwrap_or(self.threshold)
    }
}

/// Output and score of one detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorReport {
    pub name: String,
    pub result: DetectionResult,
    pub metrics: ClassificationMetrics,
    /// `P(|Z| > threshold)` for a standard normal Z.
    pub nominal_false_alarm_rate: f64,
}

impl DetectorReport {
    fn run(detector: &dyn AnomalyDetector, series: &Series) -> Result<Self> {
        let result = detector.detect(series)?;
        let metrics = evaluate(&result, series.ground_truth())?;
        let nominal_false_alarm_rate = nominal_false_alarm_rate(detector.threshold())?;
        info!(
            detector = detector.name(),
            flagged = result.flagged_count(),
            precision = metrics.precision,
            recall = metrics.recall,
            f1 = metrics.f1,
            "detector scored"
        );
        Ok(Self {
            name: detector.name().to_string(),
            result,
            metrics,
            nominal_false_alarm_rate,
        })
    }
}

/// Results of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub rolling: DetectorReport,
    pub frozen: DetectorReport,
    /// Baseline the frozen detector scored against.
    pub baseline: Baseline,
    /// Contiguous regions flagged by the frozen detector.
    pub frozen_regions: Vec<Region>,
}

/// Run both detectors over `series` and score them against its labels.
///
/// The frozen baseline is computed once from the values in `reference`,
/// conventionally the leading anomaly-free segment.
///
/// # Example
/// ```
/// use rss_anomaly::analysis::{analyze, AnalysisConfig};
/// use rss_anomaly::core::Series;
///
/// let normal: Vec<f64> = (0..40).map(|i| 1000.0 + (i % 5) as f64).collect();
/// let leak: Vec<f64> = (0..10).map(|i| 1100.0 + 10.0 * i as f64).collect();
/// let recovery: Vec<f64> = (0..20).map(|i| 1000.0 + (i % 5) as f64).collect();
/// let series = Series::from_segments(&normal, &leak, &recovery).unwrap();
///
/// let report = analyze(&series, 0..40, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.frozen.metrics.recall, 1.0);
/// assert_eq!(report.frozen_regions.len(), 1);
/// ```
pub fn analyze(
    series: &Series,
    reference: Range<usize>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    if reference.is_empty() {
        return Err(DetectionError::InvalidParameter(format!(
            "reference range {reference:?} is empty"
        )));
    }
    let baseline = Baseline::from_reference(series.slice(reference.clone())?)?;
    debug!(
        ?reference,
        mean = baseline.mean,
        std = baseline.std,
        "computed frozen baseline"
    );

    let rolling = RollingZScore::new(config.window, config.threshold)?;
    let frozen = FrozenBaseline::new(baseline, config.effective_frozen_threshold())?;

    let rolling = DetectorReport::run(&rolling, series)?;
    let frozen = DetectorReport::run(&frozen, series)?;
    let frozen_regions: Vec<Region> = collapse(&frozen.result.flags).collect();
    debug!(regions = frozen_regions.len(), "collapsed frozen detections");

    Ok(AnalysisReport {
        rolling,
        frozen,
        baseline,
        frozen_regions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leak_series() -> Series {
        let normal: Vec<f64> = (0..60)
            .map(|i| 50_000.0 + 40.0 * (i as f64 * 0.9).sin())
            .collect();
        let leak: Vec<f64> = (0..20).map(|i| 51_000.0 + 100.0 * i as f64).collect();
        let recovery: Vec<f64> = (0..30)
            .map(|i| 50_000.0 + 40.0 * (i as f64 * 0.9).cos())
            .collect();
        Series::from_segments(&normal, &leak, &recovery).unwrap()
    }

    #[test]
    fn frozen_detector_covers_injected_segment() {
        let series = leak_series();
        let report = analyze(&series, 0..60, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.frozen.name, "Frozen Baseline");
        assert_eq!(report.frozen.metrics.confusion.true_positives, 20);
        assert_eq!(report.frozen.metrics.confusion.false_positives, 0);
        assert_eq!(report.frozen_regions, vec![Region::new(60, 80)]);
    }

    #[test]
    fn rolling_detector_adapts_to_sustained_shift() {
        let series = leak_series();
        let report = analyze(&series, 0..60, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.rolling.name, "Rolling Z-Score");
        // the window absorbs the shift, so most of the segment goes unflagged
        assert!(report.rolling.metrics.recall < report.frozen.metrics.recall);
        assert!(report.rolling.result.flags[..29].iter().all(|&f| !f));
    }

    #[test]
    fn zero_variance_reference_is_an_error() {
        let series = Series::from_segments(&[10.0; 8], &[50.0; 2], &[10.0; 4]).unwrap();
        let result = analyze(&series, 0..8, &AnalysisConfig::new(3, 3.0));
        assert!(matches!(result, Err(DetectionError::UndefinedStatistic(_))));
    }

    #[test]
    fn reference_range_is_validated() {
        let series = leak_series();
        assert!(matches!(
            analyze(&series, 5..5, &AnalysisConfig::default()),
            Err(DetectionError::InvalidParameter(_))
        ));
        assert!(matches!(
            analyze(&series, 100..200, &AnalysisConfig::default()),
            Err(DetectionError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn frozen_threshold_override() {
        let config = AnalysisConfig::new(30, 3.0).with_frozen_threshold(1000.0);
        let report = analyze(&leak_series(), 0..60, &config).unwrap();
        assert_eq!(report.frozen.result.threshold, 1000.0);
        assert_eq!(report.rolling.result.threshold, 3.0);
        assert!(report.frozen_regions.is_empty());
    }

    #[test]
    fn config_from_json() {
        let config =
            AnalysisConfig::from_json(r#"{"window": 10, "threshold": 2.5, "frozen_threshold": 4.0}"#)
                .unwrap();
        assert_eq!(config.window, 10);
        assert_eq!(config.threshold, 2.5);
        assert_eq!(config.frozen_threshold, Some(4.0));

        assert_eq!(AnalysisConfig::from_json("{}").unwrap(), AnalysisConfig::default());
        assert!(matches!(
            AnalysisConfig::from_json("{\"window\": -1}"),
            Err(DetectionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn report_serializes() {
        let report = analyze(&leak_series(), 0..60, &AnalysisConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frozen_regions"][0]["start"], 60);
        assert_eq!(json["frozen"]["metrics"]["confusion"]["true_positives"], 20);
    }
}
