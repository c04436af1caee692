//! Gaze Tracker
//!
//! Per-frame gaze cursor controller:
//! - Blink and eye-openness from eye contour landmarks
//! - Calibration capture against on-screen targets
//! - Face-to-screen mapping once calibrated
//! - Exponential smoothing of the cursor

pub mod config;
pub mod outcome;
pub mod smoothing;
pub mod state;

pub use config::{TrackerConfig, DEFAULT_SMOOTHING_FACTOR};
pub use outcome::FrameOutcome;
pub use smoothing::CursorSmoother;
pub use state::{TrackerState, TrackingMode};

use calibration::{CalibrationSample, CalibrationStore};
use eye_state::{BlinkDetector, EyeState};
use gaze_mapper::GazeMapper;
use geometry::{ScreenPoint, ScreenSize};
use landmarks::{LandmarkError, LandmarkFrame};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Tracker error types
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Frame dropped: {0}")]
    Frame(#[from] LandmarkError),
}

/// Gaze tracking controller
pub struct GazeTracker {
    config: TrackerConfig,
    detector: BlinkDetector,
    mapper: GazeMapper,
    state: TrackerState,
}

impl GazeTracker {
    /// Create a tracker with the cursor parked at the screen center
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        info!(
            "Creating gaze tracker: screen={}x{}, blink_threshold={}, smoothing={}",
            config.screen.width, config.screen.height, config.blink_threshold, config.smoothing_factor
        );

        Ok(Self {
            detector: BlinkDetector::new(config.blink_threshold),
            mapper: GazeMapper::new(config.min_calibration_samples),
            state: TrackerState::new(config.smoothing_factor, config.screen.center()),
            config,
        })
    }

    /// Process the outcome of one detection call
    ///
    /// A failed detection is counted and handed back without touching the
    /// cursor, calibration or eye state, so the next frame proceeds as if
    /// it had been skipped.
    pub fn handle_frame(
        &mut self,
        frame: Result<LandmarkFrame, LandmarkError>,
    ) -> Result<FrameOutcome, TrackerError> {
        match frame {
            Ok(frame) => Ok(self.process_frame(&frame)),
            Err(e) => {
                self.state.frames_failed += 1;
                Err(TrackerError::Frame(e))
            }
        }
    }

    /// Process one landmark frame
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameOutcome {
        self.state.record_frame_time(frame.timestamp_ms);
        self.state.frames_processed += 1;

        let mut blink_started = false;
        let face = frame.primary_face();

        if let Some(face) = face {
            let layout = &self.config.layout;

            // Keep the last point when an iris is missing
            if let Some(point) = layout.gaze_point(face) {
                self.state.face_point = Some(point);
            }

            let eyes = self
                .detector
                .detect(&layout.left_eye(face), &layout.right_eye(face));
            blink_started = eyes.is_blinking && !self.state.eye_state.is_blinking;
            if blink_started {
                debug!("Blink started (avg EAR {:.3})", eyes.avg_ear);
            }
            self.state.eye_state = eyes;

            if self.state.mode == TrackingMode::Running {
                self.update_cursor();
            }
        }

        trace!(
            "Frame {:.1}ms: face={}, cursor=({:.1}, {:.1}), fps={}",
            frame.timestamp_ms,
            face.is_some(),
            self.state.cursor.position().x,
            self.state.cursor.position().y,
            self.state.fps
        );

        FrameOutcome {
            face_detected: face.is_some(),
            face_point: self.state.face_point,
            eye_state: self.state.eye_state,
            blink_started,
            cursor: self.state.cursor.position(),
            mode: self.state.mode,
            fps: self.state.fps,
        }
    }

    fn update_cursor(&mut self) {
        let mapping = self.mapper.map(
            self.state.face_point,
            self.state.calibration.samples(),
            self.config.screen,
        );
        if mapping.is_mapped() {
            self.state.cursor.update(mapping.point());
        }
    }

    /// Begin a new calibration, discarding any previous samples
    pub fn start_calibration(&mut self) {
        info!("Starting calibration (was {:?})", self.state.mode);
        self.state.calibration.reset();
        self.state.mode = TrackingMode::Calibrating;
    }

    /// Pair `screen_point` with the last known face point
    ///
    /// Returns `None` and stores nothing if no face point has been seen yet.
    pub fn capture_calibration_point(&mut self, screen_point: ScreenPoint) -> Option<CalibrationSample> {
        match self.state.face_point {
            Some(face_point) => Some(self.state.calibration.capture(screen_point, face_point)),
            None => {
                warn!(
                    "No face point available, skipping calibration target ({:.0}, {:.0})",
                    screen_point.x, screen_point.y
                );
                None
            }
        }
    }

    /// Finish calibration and start tracking
    ///
    /// Returns the number of samples collected. With fewer than the
    /// configured minimum the mapper falls back and the cursor holds.
    pub fn finalize_calibration(&mut self) -> usize {
        let count = self.state.calibration.len();
        if count < self.mapper.min_samples() {
            warn!(
                "Calibration finished with {} samples, {} needed; cursor will hold",
                count,
                self.mapper.min_samples()
            );
        } else {
            info!("Calibration finished with {} samples", count);
        }
        self.state.mode = TrackingMode::Running;
        count
    }

    /// Switch between running and paused, other modes are left alone
    pub fn toggle_pause(&mut self) -> TrackingMode {
        match self.state.mode {
            TrackingMode::Running => self.pause(),
            TrackingMode::Paused => self.resume(),
            _ => {}
        }
        self.state.mode
    }

    /// Hold the cursor while running
    pub fn pause(&mut self) {
        if self.state.mode == TrackingMode::Running {
            info!("Tracking paused");
            self.state.mode = TrackingMode::Paused;
        }
    }

    /// Resume after a pause
    pub fn resume(&mut self) {
        if self.state.mode == TrackingMode::Paused {
            info!("Tracking resumed");
            self.state.mode = TrackingMode::Running;
        }
    }

    /// Update the display size used for mapping
    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        debug!("Screen size changed to {}x{}", screen.width, screen.height);
        self.config.screen = screen;
    }

    pub fn current_cursor_position(&self) -> ScreenPoint {
        self.state.cursor.position()
    }

    pub fn mode(&self) -> TrackingMode {
        self.state.mode
    }

    pub fn eye_state(&self) -> EyeState {
        self.state.eye_state
    }

    pub fn calibration(&self) -> &CalibrationStore {
        &self.state.calibration
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
