//! Error types for the rss-anomaly library.

use thiserror::Error;

/// Result type alias for detection and evaluation operations.
pub type Result<T> = std::result::Result<T, DetectionError>;

/// Errors that can occur while detecting or scoring anomalies.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two sequences that must be aligned have different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// A statistic is undefined for the given inputs (e.g. zero variance).
    #[error("undefined statistic: {0}")]
    UndefinedStatistic(String),

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },
}
