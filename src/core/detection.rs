//! Per-sample output of an anomaly detector.

use serde::Serialize;

/// Flags and z-scores produced by one detector over one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    /// `flags[i]` is true iff sample `i` was judged anomalous.
    pub flags: Vec<bool>,
    /// Z-score for each sample (0 where the detector defines it as 0).
    pub scores: Vec<f64>,
    /// Threshold the absolute z-score had to exceed.
    pub threshold: f64,
}

impl DetectionResult {
    /// Build a result by thresholding scores: flagged iff `|z| > threshold`.
    pub fn from_scores(scores: Vec<f64>, threshold: f64) -> Self {
        let flags = scores.iter().map(|z| z.abs() > threshold).collect();
        Self {
            flags,
            scores,
            threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of flagged samples.
    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Positions of flagged samples in ascending order.
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &f)| f)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if a specific index was flagged.
    pub fn is_flagged(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Get flagged percentage.
    pub fn flagged_percentage(&self) -> f64 {
        if self.flags.is_empty() {
            0.0
        } else {
            100.0 * self.flagged_count() as f64 / self.flags.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scores_uses_strict_absolute_threshold() {
        let result = DetectionResult::from_scores(vec![0.0, 3.0, -3.5, 3.01, -2.9], 3.0);
        assert_eq!(result.flags, vec![false, false, true, true, false]);
        assert_eq!(result.flagged_count(), 2);
        assert_eq!(result.flagged_indices(), vec![2, 3]);
    }

    #[test]
    fn result_methods() {
        let mut scores = vec![0.0; 100];
        scores[10] = 5.0;
        scores[50] = -5.0;
        scores[90] = 4.0;
        let result = DetectionResult::from_scores(scores, 3.0);

        assert_eq!(result.len(), 100);
        assert!(result.is_flagged(10));
        assert!(!result.is_flagged(11));
        assert!(!result.is_flagged(1000));
        assert!((result.flagged_percentage() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn empty_result() {
        let result = DetectionResult::from_scores(Vec::new(), 3.0);
        assert!(result.is_empty());
        assert_eq!(result.flagged_percentage(), 0.0);
    }
}
