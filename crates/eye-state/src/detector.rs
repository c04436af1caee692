//! Blink and eye-openness classification

use geometry::FacePoint;
use serde::{Deserialize, Serialize};

use crate::ear::{eye_aspect_ratio, OPEN_EYE_EAR};

/// Default EAR threshold below which an eye counts as closed
pub const DEFAULT_BLINK_THRESHOLD: f64 = 0.22;

/// Eye state for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeState {
    /// Left eye aspect ratio
    pub ear_left: f64,
    /// Right eye aspect ratio
    pub ear_right: f64,
    /// Mean of both eyes
    pub avg_ear: f64,
    /// Average EAR is below the threshold
    pub is_blinking: bool,
    /// Left EAR is at or above the threshold
    pub is_left_open: bool,
    /// Right EAR is at or above the threshold
    pub is_right_open: bool,
}

impl Default for EyeState {
    fn default() -> Self {
        Self {
            ear_left: OPEN_EYE_EAR,
            ear_right: OPEN_EYE_EAR,
            avg_ear: OPEN_EYE_EAR,
            is_blinking: false,
            is_left_open: true,
            is_right_open: true,
        }
    }
}

/// Stateless blink detector with a configurable threshold
#[derive(Debug, Clone, Copy)]
pub struct BlinkDetector {
    threshold: f64,
}

impl BlinkDetector {
    /// Create a detector with the given EAR threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify a pair of EAR values
    ///
    /// Blinking is decided on the average, openness per eye, both against
    /// the same threshold. A one-eyed wink can therefore report one eye
    /// closed without a blink.
    pub fn classify(&self, ear_left: f64, ear_right: f64) -> EyeState {
        let avg_ear = (ear_left + ear_right) / 2.0;
        EyeState {
            ear_left,
            ear_right,
            avg_ear,
            is_blinking: avg_ear < self.threshold,
            is_left_open: ear_left >= self.threshold,
            is_right_open: ear_right >= self.threshold,
        }
    }

    /// Compute EARs from both eye contours and classify them
    pub fn detect(&self, left_eye: &[Option<FacePoint>], right_eye: &[Option<FacePoint>]) -> EyeState {
        self.classify(eye_aspect_ratio(left_eye), eye_aspect_ratio(right_eye))
    }
}

impl Default for BlinkDetector {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_THRESHOLD)
    }
}
