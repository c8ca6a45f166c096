//! Core data structures: the labeled series and per-sample detection output.

mod detection;
mod series;

pub use detection::DetectionResult;
pub use series::{Sample, Segment, Series, SeriesBuilder};
