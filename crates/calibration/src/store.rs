//! Calibration sample storage

use geometry::{FacePoint, ScreenPoint};
use serde::Serialize;
use tracing::debug;

/// One captured calibration pair
///
/// Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationSample {
    screen_point: ScreenPoint,
    face_point: FacePoint,
}

impl CalibrationSample {
    pub fn new(screen_point: ScreenPoint, face_point: FacePoint) -> Self {
        Self {
            screen_point,
            face_point,
        }
    }

    /// Target the user was looking at
    pub fn screen_point(&self) -> ScreenPoint {
        self.screen_point
    }

    /// Face point observed while looking at the target
    pub fn face_point(&self) -> FacePoint {
        self.face_point
    }
}

/// Ordered calibration samples, in capture order
///
/// No deduplication, no upper bound. Spacing the targets is the job of the
/// calibration sequence.
#[derive(Debug, Clone, Default)]
pub struct CalibrationStore {
    samples: Vec<CalibrationSample>,
}

impl CalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all samples
    pub fn reset(&mut self) {
        debug!("Clearing {} calibration samples", self.samples.len());
        self.samples.clear();
    }

    /// Append one sample and return it
    pub fn capture(&mut self, screen_point: ScreenPoint, face_point: FacePoint) -> CalibrationSample {
        let sample = CalibrationSample::new(screen_point, face_point);
        self.samples.push(sample);
        debug!(
            "Captured calibration sample #{}: screen=({:.1}, {:.1}) face=({:.4}, {:.4})",
            self.samples.len(),
            screen_point.x,
            screen_point.y,
            face_point.x,
            face_point.y
        );
        sample
    }

    pub fn samples(&self) -> &[CalibrationSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_preserves_order() {
        let mut store = CalibrationStore::new();
        store.capture(ScreenPoint::new(10.0, 10.0), FacePoint::new(0.4, 0.4));
        store.capture(ScreenPoint::new(90.0, 10.0), FacePoint::new(0.6, 0.4));

        assert_eq!(store.len(), 2);
        assert_eq!(store.samples()[0].screen_point(), ScreenPoint::new(10.0, 10.0));
        assert_eq!(store.samples()[1].face_point(), FacePoint::new(0.6, 0.4));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut store = CalibrationStore::new();
        for _ in 0..3 {
            store.capture(ScreenPoint::new(1.0, 1.0), FacePoint::new(0.5, 0.5));
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reset_clears() {
        let mut store = CalibrationStore::new();
        store.capture(ScreenPoint::new(1.0, 1.0), FacePoint::new(0.5, 0.5));
        store.reset();
        assert!(store.is_empty());
        assert!(store.samples().is_empty());
    }
}
