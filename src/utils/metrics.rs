//! Classification metrics for scoring detector output against ground truth.

use crate::core::DetectionResult;
use crate::error::{DetectionError, Result};
use serde::Serialize;

/// Counts of true/false positives/negatives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally pairwise agreement between predictions and truth.
    ///
    /// Sequences must have equal length; see [`evaluate_flags`].
    fn tally(predicted: &[bool], truth: &[bool]) -> Self {
        let mut cm = Self::default();
        for (&p, &t) in predicted.iter().zip(truth.iter()) {
            match (p, t) {
                (true, true) => cm.true_positives += 1,
                (true, false) => cm.false_positives += 1,
                (false, true) => cm.false_negatives += 1,
                (false, false) => cm.true_negatives += 1,
            }
        }
        cm
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Matrix layout `[[tn, fp], [fn, tp]]`: rows are truth, columns predictions.
    pub fn as_matrix(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }
}

/// Precision, recall and F1 with the confusion counts they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    /// `tp / (tp + fp)`, or 0 when nothing was flagged.
    pub precision: f64,
    /// `tp / (tp + fn)`, or 0 when the truth has no positives.
    pub recall: f64,
    /// Harmonic mean of precision and recall, or 0 when both are 0.
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationMetrics {
    fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let tp = confusion.true_positives;
        let precision = ratio(tp, tp + confusion.false_positives);
        let recall = ratio(tp, tp + confusion.false_negatives);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            precision,
            recall,
            f1,
            confusion,
        }
    }

    /// Fraction of samples classified correctly, or 0 for empty input.
    pub fn accuracy(&self) -> f64 {
        let c = &self.confusion;
        ratio(c.true_positives + c.true_negatives, c.total())
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Score a detector's output against ground-truth labels.
///
/// # Example
/// ```
/// use rss_anomaly::core::DetectionResult;
/// use rss_anomaly::utils::evaluate;
///
/// let detected = DetectionResult::from_scores(vec![4.0, 0.0, 4.0, 4.0], 3.0);
/// let metrics = evaluate(&detected, &[true, false, false, true]).unwrap();
///
/// assert_eq!(metrics.confusion.true_positives, 2);
/// assert!((metrics.f1 - 0.8).abs() < 1e-10);
/// ```
pub fn evaluate(detected: &DetectionResult, ground_truth: &[bool]) -> Result<ClassificationMetrics> {
    evaluate_flags(&detected.flags, ground_truth)
}

/// Score raw flag sequences.
///
/// Returns `LengthMismatch` if the sequences differ in length; they are
/// never truncated or padded.
pub fn evaluate_flags(predicted: &[bool], ground_truth: &[bool]) -> Result<ClassificationMetrics> {
    if predicted.len() != ground_truth.len() {
        return Err(DetectionError::LengthMismatch {
            expected: ground_truth.len(),
            got: predicted.len(),
        });
    }
    Ok(ClassificationMetrics::from_confusion(ConfusionMatrix::tally(
        predicted,
        ground_truth,
    )))
}
