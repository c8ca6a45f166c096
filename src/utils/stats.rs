//! Statistical utility functions.
//!
//! Every statistic that can be undefined for some input (empty slice, one
//! sample, zero variance) is returned as an `Option` or a tagged `Result`
//! rather than a NaN, so downstream threshold comparisons never silently
//! evaluate to `false` through NaN propagation.

use crate::error::{DetectionError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Calculate the mean of a slice.
///
/// Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the sample variance of a slice (n-1 denominator).
///
/// Returns `None` when fewer than two values are given. A slice whose values
/// are all identical has a variance of exactly `0.0`.
pub fn variance(values: &[f64]) -> Option<f64> {
    mean_and_variance(values).map(|(_, var)| var)
}

/// Calculate the sample standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Mean and sample variance.
///
/// Constant slices short-circuit to `(value, 0.0)`: summing `n` copies of a
/// value and dividing by `n` is not exact in floating point, and the residue
/// would otherwise show up as a tiny non-zero variance.
fn mean_and_variance(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let first = values[0];
    if values.iter().all(|&x| x == first) {
        return Some((first, 0.0));
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    Some((m, sum_sq / (values.len() - 1) as f64))
}

/// Mean and sample standard deviation of a trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Mean of the window.
    pub mean: f64,
    /// Sample standard deviation of the window.
    pub std: f64,
    /// Whether a z-score is defined against these statistics (`std > 0`).
    pub defined: bool,
}

impl WindowStats {
    /// Standardize `value` against this window.
    ///
    /// Returns `UndefinedStatistic` when the window has zero variance.
    pub fn z_score(&self, value: f64) -> Result<f64> {
        if !self.defined {
            return Err(DetectionError::UndefinedStatistic(
                "window has zero variance".to_string(),
            ));
        }
        z_score(value, self.mean, self.std)
    }
}

/// Compute statistics over the trailing window `[index + 1 - window, index]`.
///
/// Returns `Ok(None)` when fewer than `window` values end at `index`
/// (insufficient history). A one-value window has no sample standard
/// deviation and is reported as not `defined`, the same as a constant window.
///
/// # Example
/// ```
/// use rss_anomaly::utils::window_stats;
///
/// let values = [10.0, 10.0, 50.0];
/// assert!(window_stats(&values, 0, 2).unwrap().is_none());
///
/// let stats = window_stats(&values, 2, 2).unwrap().unwrap();
/// assert!((stats.mean - 30.0).abs() < 1e-10);
/// assert!(stats.defined);
/// ```
pub fn window_stats(values: &[f64], index: usize, window: usize) -> Result<Option<WindowStats>> {
    if window == 0 {
        return Err(DetectionError::InvalidParameter(
            "window must be positive".to_string(),
        ));
    }
    if index >= values.len() {
        return Err(DetectionError::IndexOutOfBounds {
            index,
            size: values.len(),
        });
    }
    if index + 1 < window {
        return Ok(None);
    }

    let segment = &values[index + 1 - window..=index];
    let stats = match mean_and_variance(segment) {
        Some((mean, var)) => {
            let std = var.sqrt();
            WindowStats {
                mean,
                std,
                defined: std > 0.0 && std.is_finite(),
            }
        }
        // single-value window
        None => WindowStats {
            mean: segment[0],
            std: 0.0,
            defined: false,
        },
    };
    Ok(Some(stats))
}

/// Standardized deviation `(value - mean) / std`.
///
/// Returns `UndefinedStatistic` instead of dividing by a zero, negative or
/// non-finite standard deviation.
///
/// # Example
/// ```
/// use rss_anomaly::utils::z_score;
///
/// assert!((z_score(13.0, 10.0, 1.5).unwrap() - 2.0).abs() < 1e-10);
/// assert!(z_score(13.0, 10.0, 0.0).is_err());
/// ```
pub fn z_score(value: f64, mean: f64, std: f64) -> Result<f64> {
    if !(std > 0.0 && std.is_finite()) {
        return Err(DetectionError::UndefinedStatistic(format!(
            "standard deviation must be positive and finite, got {std}"
        )));
    }
    if !value.is_finite() || !mean.is_finite() {
        return Err(DetectionError::UndefinedStatistic(format!(
            "non-finite input: value={value}, mean={mean}"
        )));
    }
    Ok((value - mean) / std)
}

/// Probability that a standard normal variable exceeds `threshold` in absolute value.
///
/// This is the false-alarm rate a `|z| > threshold` rule implies when the
/// data really are Gaussian; for the default threshold of 3 it is about 0.27%.
///
/// # Example
/// ```
/// use rss_anomaly::utils::nominal_false_alarm_rate;
///
/// let rate = nominal_false_alarm_rate(3.0).unwrap();
/// assert!((rate - 0.0027).abs() < 1e-4);
/// ```
pub fn nominal_false_alarm_rate(threshold: f64) -> Result<f64> {
    if !(threshold > 0.0 && threshold.is_finite()) {
        return Err(DetectionError::InvalidParameter(format!(
            "threshold must be positive and finite, got {threshold}"
        )));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| DetectionError::InvalidParameter(e.to_string()))?;
    Ok(2.0 * normal.cdf(-threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0, epsilon = 1e-10);
        assert_relative_eq!(mean(&[10.0]).unwrap(), 10.0, epsilon = 1e-10);
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn variance_calculates_correctly() {
        // Sample variance of [1, 2, 3, 4, 5] = 2.5
        assert_relative_eq!(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 2.5, epsilon = 1e-10);
        assert!(variance(&[1.0]).is_none());
        assert!(variance(&[]).is_none());
    }

    #[test]
    fn std_dev_calculates_correctly() {
        assert_relative_eq!(
            std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            2.5_f64.sqrt(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn constant_values_have_exactly_zero_variance() {
        assert_eq!(variance(&[10.1, 10.1, 10.1]), Some(0.0));
        assert_eq!(std_dev(&[0.3; 7]), Some(0.0));
    }

    #[test]
    fn window_stats_insufficient_history() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(window_stats(&values, 0, 3).unwrap(), None);
        assert_eq!(window_stats(&values, 1, 3).unwrap(), None);
        assert!(window_stats(&values, 2, 3).unwrap().is_some());
    }

    #[test]
    fn window_stats_uses_trailing_window_including_index() {
        let values = [10.0, 10.0, 10.0, 50.0, 10.0, 10.0];

        let stats = window_stats(&values, 3, 2).unwrap().unwrap();
        assert_relative_eq!(stats.mean, 30.0, epsilon = 1e-10);
        assert_relative_eq!(stats.std, 800.0_f64.sqrt(), epsilon = 1e-10);
        assert!(stats.defined);

        let stats = window_stats(&values, 5, 2).unwrap().unwrap();
        assert_eq!(stats.std, 0.0);
        assert!(!stats.defined);
    }

    #[test]
    fn window_stats_single_value_window_is_undefined() {
        let stats = window_stats(&[4.0, 9.0], 1, 1).unwrap().unwrap();
        assert_eq!(stats.mean, 9.0);
        assert!(!stats.defined);
        assert!(matches!(
            stats.z_score(9.0),
            Err(DetectionError::UndefinedStatistic(_))
        ));
    }

    #[test]
    fn window_stats_rejects_bad_arguments() {
        assert!(matches!(
            window_stats(&[1.0, 2.0], 0, 0),
            Err(DetectionError::InvalidParameter(_))
        ));
        assert_eq!(
            window_stats(&[1.0, 2.0], 2, 1),
            Err(DetectionError::IndexOutOfBounds { index: 2, size: 2 })
        );
    }

    #[test]
    fn z_score_is_tagged_on_zero_std() {
        assert_relative_eq!(z_score(50.0, 30.0, 20.0).unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(z_score(10.0, 30.0, 20.0).unwrap(), -1.0, epsilon = 1e-10);
        assert!(matches!(
            z_score(10.0, 10.0, 0.0),
            Err(DetectionError::UndefinedStatistic(_))
        ));
        assert!(z_score(10.0, 10.0, f64::NAN).is_err());
        assert!(z_score(10.0, 10.0, -1.0).is_err());
        assert!(z_score(f64::NAN, 10.0, 1.0).is_err());
    }

    #[test]
    fn nominal_false_alarm_rate_known_values() {
        assert_relative_eq!(nominal_false_alarm_rate(1.96).unwrap(), 0.05, epsilon = 1e-3);
        assert_relative_eq!(nominal_false_alarm_rate(3.0).unwrap(), 0.0026998, epsilon = 1e-5);
        assert!(nominal_false_alarm_rate(0.0).is_err());
        assert!(nominal_false_alarm_rate(f64::INFINITY).is_err());
    }
}
