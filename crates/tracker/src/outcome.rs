//! Per-frame tracker output

use eye_state::EyeState;
use geometry::{FacePoint, ScreenPoint};
use serde::Serialize;

use crate::state::TrackingMode;

/// Result of processing one landmark frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameOutcome {
    /// Whether the frame contained a face
    pub face_detected: bool,

    /// Last known face point (may come from an earlier frame)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_point: Option<FacePoint>,

    /// Eye state (carried over when no face was found)
    pub eye_state: EyeState,

    /// Blink began on this frame
    pub blink_started: bool,

    /// Smoothed cursor position
    pub cursor: ScreenPoint,

    /// Mode the frame was processed in
    pub mode: TrackingMode,

    /// Current frame rate
    pub fps: f64,
}

impl FrameOutcome {
    /// Whether the cursor is being driven by gaze
    pub fn is_active(&self) -> bool {
        self.mode == TrackingMode::Running
    }

    /// A blink onset while tracking, read as a click
    pub fn is_click(&self) -> bool {
        self.blink_started && self.is_active()
    }
}
