//! Scalar helpers

use crate::point::Planar;

/// Linear interpolation between `start` and `end`
///
/// `amount` is not clamped; values outside [0, 1] extrapolate.
pub fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * end
}

/// Euclidean distance between two points
///
/// Returns `0.0` when either point is missing. Callers treat that as a
/// degenerate value rather than a measurement.
pub fn distance<P: Planar>(p1: Option<&P>, p2: Option<&P>) -> f64 {
    match (p1, p2) {
        (Some(a), Some(b)) => ((b.x() - a.x()).powi(2) + (b.y() - a.y()).powi(2)).sqrt(),
        _ => 0.0,
    }
}
