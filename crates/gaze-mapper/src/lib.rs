//! Gaze Mapping
//!
//! Converts a face point into a screen estimate by normalizing it against
//! the bounding box of the calibration face points, one axis at a time.
//! Points outside the calibrated range saturate at the screen edges.

mod bounds;
mod mapper;

pub use bounds::{FaceBounds, RANGE_EPSILON};
pub use mapper::{GazeMapper, Mapping, DEFAULT_MIN_SAMPLES};
