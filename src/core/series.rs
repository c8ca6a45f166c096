//! Labeled RSS series assembled from contiguous segments.

use crate::error::{DetectionError, Result};
use serde::Serialize;
use std::ops::Range;

/// One observation of the monitored metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Zero-based position in the assembled series.
    pub index: usize,
    /// Resident memory size in kilobytes.
    pub value: f64,
    /// Ground-truth label.
    pub is_anomaly: bool,
}

/// A contiguous block of samples that shared a label when assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Positions covered by the segment, half-open.
    pub range: Range<usize>,
    /// Whether every sample in the segment is labeled anomalous.
    pub is_anomaly: bool,
}

/// An ordered, immutable sequence of labeled samples.
///
/// Values and labels are stored column-wise; `samples()` yields them as
/// [`Sample`]s whose `index` always equals their position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    labels: Vec<bool>,
    segments: Vec<Segment>,
}

/// Builder that concatenates labeled segments into a [`Series`].
///
/// # Example
/// ```
/// use rss_anomaly::core::SeriesBuilder;
///
/// let series = SeriesBuilder::new()
///     .segment(vec![100.0, 101.0, 99.0], false)
///     .segment(vec![180.0, 190.0], true)
///     .segment(vec![100.0], false)
///     .build()
///     .unwrap();
///
/// assert_eq!(series.len(), 6);
/// assert_eq!(series.ground_truth(), &[false, false, false, true, true, false]);
/// assert_eq!(series.anomaly_range(), Some(3..5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    segments: Vec<(Vec<f64>, bool)>,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment whose samples all carry the label `is_anomaly`.
    pub fn segment(mut self, values: Vec<f64>, is_anomaly: bool) -> Self {
        self.segments.push((values, is_anomaly));
        self
    }

    pub fn build(self) -> Result<Series> {
        let total: usize = self.segments.iter().map(|(v, _)| v.len()).sum();
        let mut values = Vec::with_capacity(total);
        let mut labels = Vec::with_capacity(total);
        let mut segments = Vec::with_capacity(self.segments.len());

        for (segment, is_anomaly) in self.segments {
            let start = values.len();
            labels.extend(std::iter::repeat(is_anomaly).take(segment.len()));
            values.extend(segment);
            segments.push(Segment {
                range: start..values.len(),
                is_anomaly,
            });
        }

        validate_values(&values)?;
        Ok(Series {
            values,
            labels,
            segments,
        })
    }
}

impl Series {
    /// Create a series from values and a parallel ground-truth sequence.
    pub fn new(values: Vec<f64>, ground_truth: Vec<bool>) -> Result<Self> {
        if values.len() != ground_truth.len() {
            return Err(DetectionError::LengthMismatch {
                expected: values.len(),
                got: ground_truth.len(),
            });
        }
        validate_values(&values)?;
        let segments = segments_from_labels(&ground_truth);
        Ok(Self {
            values,
            labels: ground_truth,
            segments,
        })
    }

    /// Create a series with every sample labeled normal.
    pub fn unlabeled(values: Vec<f64>) -> Result<Self> {
        let labels = vec![false; values.len()];
        Self::new(values, labels)
    }

    /// Concatenate a normal segment, an injected-anomaly segment and a
    /// recovery segment, labeling only the middle one anomalous.
    pub fn from_segments(normal: &[f64], anomalous: &[f64], recovery: &[f64]) -> Result<Self> {
        SeriesBuilder::new()
            .segment(normal.to_vec(), false)
            .segment(anomalous.to_vec(), true)
            .segment(recovery.to_vec(), false)
            .build()
    }

    pub fn builder() -> SeriesBuilder {
        SeriesBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw metric values in order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Ground-truth anomaly labels, parallel to `values()`.
    pub fn ground_truth(&self) -> &[bool] {
        &self.labels
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        let value = *self.values.get(index)?;
        Some(Sample {
            index,
            value,
            is_anomaly: self.labels[index],
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.values
            .iter()
            .zip(self.labels.iter())
            .enumerate()
            .map(|(index, (&value, &is_anomaly))| Sample {
                index,
                value,
                is_anomaly,
            })
    }

    /// Segments as assembled (or as runs of equal labels for [`Series::new`]).
    ///
    /// Empty segments passed to the builder are kept so positions line up
    /// with the caller's segment list.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Range spanning every anomalous label, if any.
    pub fn anomaly_range(&self) -> Option<Range<usize>> {
        let start = self.labels.iter().position(|&l| l)?;
        let end = self.labels.iter().rposition(|&l| l)? + 1;
        Some(start..end)
    }

    /// Values within `range`, or an error if it does not lie inside the series.
    pub fn slice(&self, range: Range<usize>) -> Result<&[f64]> {
        if range.start > range.end {
            return Err(DetectionError::InvalidParameter(format!(
                "range start {} exceeds end {}",
                range.start, range.end
            )));
        }
        if range.end > self.values.len() {
            return Err(DetectionError::IndexOutOfBounds {
                index: range.end,
                size: self.values.len(),
            });
        }
        Ok(&self.values[range])
    }
}

fn validate_values(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(DetectionError::InvalidParameter(format!(
            "non-finite value {} at index {i}",
            values[i]
        ))),
        None => Ok(()),
    }
}

fn segments_from_labels(labels: &[bool]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for (i, &label) in labels.iter().enumerate() {
        match segments.last_mut() {
            Some(last) if last.is_anomaly == label => last.range.end = i + 1,
            _ => segments.push(Segment {
                range: i..i + 1,
                is_anomaly: label,
            }),
        }
    }
    segments
}
