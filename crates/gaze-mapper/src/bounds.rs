//! Calibration face-point extremes

use calibration::CalibrationSample;
use geometry::FacePoint;
use serde::Serialize;

/// Range substituted for an axis whose calibration extent is zero
pub const RANGE_EPSILON: f64 = 1e-4;

/// Min/max of the calibration face points on each axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl FaceBounds {
    /// Bounds of all sample face points, `None` for an empty set
    pub fn from_samples(samples: &[CalibrationSample]) -> Option<Self> {
        let first = samples.first()?.face_point();
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };

        Some(samples.iter().skip(1).fold(init, |b, s| {
            let p = s.face_point();
            Self {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            }
        }))
    }

    pub fn range_x(&self) -> f64 {
        non_zero(self.max_x - self.min_x)
    }

    pub fn range_y(&self) -> f64 {
        non_zero(self.max_y - self.min_y)
    }

    /// Position of `point` within the bounds, clamped to [0, 1] per axis
    pub fn normalize(&self, point: FacePoint) -> (f64, f64) {
        let norm_x = (point.x - self.min_x) / self.range_x();
        let norm_y = (point.y - self.min_y) / self.range_y();
        (norm_x.clamp(0.0, 1.0), norm_y.clamp(0.0, 1.0))
    }
}

fn non_zero(range: f64) -> f64 {
    if range == 0.0 {
        RANGE_EPSILON
    } else {
        range
    }
}
