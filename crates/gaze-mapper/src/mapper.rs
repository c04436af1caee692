//! Face-to-screen mapping

use calibration::CalibrationSample;
use geometry::{FacePoint, ScreenPoint, ScreenSize};
use serde::Serialize;
use tracing::trace;

use crate::bounds::FaceBounds;

/// Fewest calibration samples the mapper will use
pub const DEFAULT_MIN_SAMPLES: usize = 4;

/// Result of a mapping call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Mapping {
    /// Estimate derived from the calibration
    Mapped(ScreenPoint),
    /// Screen center, used when calibration or face point is missing
    Fallback(ScreenPoint),
}

impl Mapping {
    /// Screen position regardless of how it was obtained
    pub fn point(&self) -> ScreenPoint {
        match self {
            Mapping::Mapped(p) | Mapping::Fallback(p) => *p,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Mapping::Mapped(_))
    }
}

/// Min/max normalization gaze mapper
///
/// Bounds are recomputed from the full calibration set on every call.
/// Calibration sets hold tens of points and mapping runs once per camera
/// frame.
#[derive(Debug, Clone, Copy)]
pub struct GazeMapper {
    min_samples: usize,
}

impl GazeMapper {
    pub fn new(min_samples: usize) -> Self {
        Self { min_samples }
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Whether `samples` is large enough to map against
    pub fn is_calibrated(&self, samples: &[CalibrationSample]) -> bool {
        samples.len() >= self.min_samples
    }

    /// Map a face point onto the screen
    pub fn map(
        &self,
        face_point: Option<FacePoint>,
        samples: &[CalibrationSample],
        screen: ScreenSize,
    ) -> Mapping {
        let face_point = match face_point {
            Some(p) if p.is_finite() && self.is_calibrated(samples) => p,
            _ => {
                trace!(
                    "Mapping fallback: {} samples, face point present = {}",
                    samples.len(),
                    face_point.is_some()
                );
                return Mapping::Fallback(screen.center());
            }
        };

        // A minimum of zero with an empty set still has no bounds
        let Some(bounds) = FaceBounds::from_samples(samples) else {
            return Mapping::Fallback(screen.center());
        };

        let (norm_x, norm_y) = bounds.normalize(face_point);
        Mapping::Mapped(screen.at_fraction(norm_x, norm_y))
    }
}

impl Default for GazeMapper {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize::new(1920.0, 1080.0);

    fn unit_square() -> Vec<CalibrationSample> {
        let w = SCREEN.width;
        let h = SCREEN.height;
        vec![
            CalibrationSample::new(ScreenPoint::new(0.0, 0.0), FacePoint::new(0.0, 0.0)),
            CalibrationSample::new(ScreenPoint::new(w, 0.0), FacePoint::new(1.0, 0.0)),
            CalibrationSample::new(ScreenPoint::new(0.0, h), FacePoint::new(0.0, 1.0)),
            CalibrationSample::new(ScreenPoint::new(w, h), FacePoint::new(1.0, 1.0)),
        ]
    }

    #[test]
    fn test_too_few_samples_falls_back_to_center() {
        let mapper = GazeMapper::default();
        let samples = &unit_square()[..3];
        for face in [FacePoint::new(0.0, 0.0), FacePoint::new(0.9, 0.1), FacePoint::new(5.0, -5.0)] {
            let mapping = mapper.map(Some(face), samples, SCREEN);
            assert_eq!(mapping, Mapping::Fallback(ScreenPoint::new(960.0, 540.0)));
        }
    }

    #[test]
    fn test_missing_face_point_falls_back() {
        let mapper = GazeMapper::default();
        let mapping = mapper.map(None, &unit_square(), SCREEN);
        assert!(!mapping.is_mapped());
        assert_eq!(mapping.point(), SCREEN.center());
    }

    #[test]
    fn test_unit_square_center() {
        let mapper = GazeMapper::default();
        let mapping = mapper.map(Some(FacePoint::new(0.5, 0.5)), &unit_square(), SCREEN);
        assert_eq!(mapping, Mapping::Mapped(ScreenPoint::new(960.0, 540.0)));
    }

    #[test]
    fn test_unit_square_corners_and_overshoot() {
        let mapper = GazeMapper::default();
        let samples = unit_square();

        let origin = mapper.map(Some(FacePoint::new(0.0, 0.0)), &samples, SCREEN);
        assert_eq!(origin.point(), ScreenPoint::new(0.0, 0.0));

        let far = mapper.map(Some(FacePoint::new(1.0, 1.0)), &samples, SCREEN);
        assert_eq!(far.point(), ScreenPoint::new(1920.0, 1080.0));

        let outside = mapper.map(Some(FacePoint::new(1.5, 1.5)), &samples, SCREEN);
        assert_eq!(outside, Mapping::Mapped(ScreenPoint::new(1920.0, 1080.0)));
    }

    #[test]
    fn test_degenerate_x_range_stays_finite() {
        let mapper = GazeMapper::default();
        let samples: Vec<_> = [0.1, 0.3, 0.6, 0.9]
            .iter()
            .map(|&y| CalibrationSample::new(ScreenPoint::default(), FacePoint::new(0.5, y)))
            .collect();

        for x in [0.0, 0.5, 0.50001, 1.0] {
            let p = mapper.map(Some(FacePoint::new(x, 0.6)), &samples, SCREEN).point();
            assert!(p.x.is_finite());
            assert!((0.0..=SCREEN.width).contains(&p.x));
        }
    }

    #[test]
    fn test_follows_screen_size() {
        let mapper = GazeMapper::default();
        let small = ScreenSize::new(800.0, 600.0);
        let p = mapper.map(Some(FacePoint::new(0.25, 0.75)), &unit_square(), small).point();
        assert_eq!(p, ScreenPoint::new(200.0, 450.0));
    }

    #[test]
    fn test_custom_minimum() {
        let mapper = GazeMapper::new(2);
        let samples = &unit_square()[..2];
        // y range is zero here, x still maps
        let p = mapper.map(Some(FacePoint::new(0.5, 0.0)), samples, SCREEN);
        assert!(p.is_mapped());
        assert_eq!(p.point().x, 960.0);
    }

    #[test]
    fn test_non_finite_face_point_falls_back() {
        let mapper = GazeMapper::default();
        let samples = unit_square();
        for face in [FacePoint::new(f64::NAN, 0.5), FacePoint::new(0.5, f64::NEG_INFINITY)] {
            let mapping = mapper.map(Some(face), &samples, SCREEN);
            assert_eq!(mapping, Mapping::Fallback(SCREEN.center()));
        }
    }
}
