//! Tracker state carried between frames

use calibration::CalibrationStore;
use eye_state::EyeState;
use geometry::{FacePoint, ScreenPoint};
use serde::{Deserialize, Serialize};

use crate::smoothing::CursorSmoother;

/// Tracking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingMode {
    /// Not calibrated yet
    #[default]
    Idle,
    /// Collecting calibration samples
    Calibrating,
    /// Mapping gaze to the cursor
    Running,
    /// Calibrated, cursor held
    Paused,
}

/// Everything the tracker remembers between frames
#[derive(Debug, Clone)]
pub struct TrackerState {
    /// Current mode
    pub mode: TrackingMode,

    /// Samples of the current calibration
    pub calibration: CalibrationStore,

    /// Smoothed cursor, persists across modes
    pub cursor: CursorSmoother,

    /// Last face point seen with both irises present
    pub face_point: Option<FacePoint>,

    /// Eye state of the last frame with a face
    pub eye_state: EyeState,

    /// Timestamp of the previous frame (ms)
    pub last_frame_ms: Option<f64>,

    /// Frame rate from the last two timestamps
    pub fps: f64,

    /// Frames processed
    pub frames_processed: u64,

    /// Frames the landmark source failed to deliver
    pub frames_failed: u64,
}

impl TrackerState {
    /// Fresh state with the cursor parked at `cursor_start`
    pub fn new(smoothing_factor: f64, cursor_start: ScreenPoint) -> Self {
        Self {
            mode: TrackingMode::Idle,
            calibration: CalibrationStore::new(),
            cursor: CursorSmoother::new(smoothing_factor, cursor_start),
            face_point: None,
            eye_state: EyeState::default(),
            last_frame_ms: None,
            fps: 0.0,
            frames_processed: 0,
            frames_failed: 0,
        }
    }

    /// Update the frame rate from a new frame timestamp
    ///
    /// Non-increasing timestamps keep the previous rate.
    pub fn record_frame_time(&mut self, timestamp_ms: f64) {
        if let Some(last) = self.last_frame_ms {
            let delta = timestamp_ms - last;
            if delta > 0.0 {
                self.fps = (1000.0 / delta).round();
            }
        }
        self.last_frame_ms = Some(timestamp_ms);
    }
}
