//! Anomaly detectors for RSS series.
//!
//! This module provides:
//! - [`RollingZScore`]: adaptive z-score against a trailing window
//! - [`FrozenBaseline`]: z-score against a fixed reference mean/std
//! - [`collapse`]: flag sequence to contiguous [`Region`]s

mod frozen;
mod regions;
mod rolling;
mod traits;

pub use frozen::{detect_frozen, Baseline, FrozenBaseline};
pub use regions::{collapse, expand, Region, Regions};
pub use rolling::{detect_rolling, RollingZScore, DEFAULT_THRESHOLD, DEFAULT_WINDOW};
pub use traits::{AnomalyDetector, BoxedDetector};
