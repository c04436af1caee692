//! Tracker configuration

use eye_state::DEFAULT_BLINK_THRESHOLD;
use gaze_mapper::DEFAULT_MIN_SAMPLES;
use geometry::ScreenSize;
use landmarks::LandmarkLayout;
use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Default cursor smoothing factor
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.15;

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// EAR below which the eyes count as closed
    pub blink_threshold: f64,

    /// Weight of the newest mapped point in the cursor average (0-1]
    pub smoothing_factor: f64,

    /// Calibration samples required before mapping
    pub min_calibration_samples: usize,

    /// Display size the cursor lives in
    pub screen: ScreenSize,

    /// Landmark indices of the eyes and irises
    pub layout: LandmarkLayout,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            blink_threshold: DEFAULT_BLINK_THRESHOLD,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            min_calibration_samples: DEFAULT_MIN_SAMPLES,
            screen: ScreenSize::default(),
            layout: LandmarkLayout::default(),
        }
    }
}

impl TrackerConfig {
    /// Faster cursor, more jitter
    pub fn responsive() -> Self {
        Self {
            smoothing_factor: 0.3,
            ..Default::default()
        }
    }

    /// Slower cursor, less jitter
    pub fn steady() -> Self {
        Self {
            smoothing_factor: 0.08,
            ..Default::default()
        }
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(TrackerError::Config(format!(
                "smoothing_factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if !(self.blink_threshold.is_finite() && self.blink_threshold > 0.0) {
            return Err(TrackerError::Config(format!(
                "blink_threshold must be positive, got {}",
                self.blink_threshold
            )));
        }
        if self.min_calibration_samples == 0 {
            return Err(TrackerError::Config(
                "min_calibration_samples must be at least 1".into(),
            ));
        }
        if !(self.screen.width > 0.0 && self.screen.height > 0.0) {
            return Err(TrackerError::Config(format!(
                "screen must have a positive size, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        Ok(())
    }
}
