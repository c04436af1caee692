//! Simulated face-mesh detector
//!
//! Produces a deterministic synthetic face for running the pipeline without
//! a camera: the irises sweep a Lissajous path and both eyes blink at a
//! fixed period.

use std::cell::Cell;
use std::f64::consts::TAU;

use geometry::FacePoint;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::frame::{FaceLandmarks, LandmarkFrame};
use crate::layout::LandmarkLayout;
use crate::{LandmarkError, LandmarkSource};

/// Eye width in normalized units
const EYE_WIDTH: f64 = 0.06;
/// Eye height / width for open and closed eyes (this is the EAR)
const OPEN_RATIO: f64 = 0.3;
const CLOSED_RATIO: f64 = 0.05;
/// Resting eye centers
const LEFT_EYE_CENTER: FacePoint = FacePoint::new(0.44, 0.42);
const RIGHT_EYE_CENTER: FacePoint = FacePoint::new(0.56, 0.42);
/// Iris sweep amplitude and periods
const SWEEP_X: f64 = 0.012;
const SWEEP_Y: f64 = 0.008;
const PERIOD_X_MS: f64 = 4000.0;
const PERIOD_Y_MS: f64 = 6500.0;

/// Simulated source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedConfig {
    /// Spacing of frame timestamps (ms)
    pub frame_interval_ms: f64,
    /// Stop after this many frames, run forever if unset
    pub frames: Option<u64>,
    /// Frames between blink onsets, 0 disables blinking
    pub blink_period_frames: u64,
    /// Length of a blink in frames
    pub blink_frames: u64,
    /// Fail every Nth detection call
    pub failure_every: Option<u64>,
    /// Readiness polls before the detector reports loaded
    pub load_delay_polls: u32,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 30.0,
            frames: None,
            blink_period_frames: 150,
            blink_frames: 4,
            failure_every: None,
            load_delay_polls: 0,
        }
    }
}

/// Synthetic landmark source
pub struct SimulatedSource {
    config: SimulatedConfig,
    layout: LandmarkLayout,
    frame_index: u64,
    polls: Cell<u32>,
    closed: bool,
}

impl SimulatedSource {
    pub fn new(config: SimulatedConfig) -> Self {
        info!("Creating simulated landmark source");
        Self {
            config,
            layout: LandmarkLayout::face_mesh(),
            frame_index: 0,
            polls: Cell::new(0),
            closed: false,
        }
    }

    /// Use a different landmark layout for the generated mesh
    pub fn with_layout(mut self, layout: LandmarkLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Whether frame `index` falls inside a blink
    pub fn is_blink_frame(&self, index: u64) -> bool {
        let period = self.config.blink_period_frames;
        period > 0 && index % period >= period - self.config.blink_frames.min(period)
    }

    /// Build the face for frame `index`
    pub fn face_at(&self, index: u64) -> FaceLandmarks {
        let t = index as f64 * self.config.frame_interval_ms;
        let gaze_dx = SWEEP_X * (TAU * t / PERIOD_X_MS).sin();
        let gaze_dy = SWEEP_Y * (TAU * t / PERIOD_Y_MS).sin();
        let ratio = if self.is_blink_frame(index) {
            CLOSED_RATIO
        } else {
            OPEN_RATIO
        };

        let mut points = vec![FacePoint::new(0.5, 0.5); self.layout.mesh_len()];
        place_eye(&mut points, &self.layout.left_eye, LEFT_EYE_CENTER, ratio);
        place_eye(&mut points, &self.layout.right_eye, RIGHT_EYE_CENTER, ratio);
        points[self.layout.left_iris] =
            FacePoint::new(LEFT_EYE_CENTER.x + gaze_dx, LEFT_EYE_CENTER.y + gaze_dy);
        points[self.layout.right_iris] =
            FacePoint::new(RIGHT_EYE_CENTER.x + gaze_dx, RIGHT_EYE_CENTER.y + gaze_dy);

        FaceLandmarks::new(points)
    }
}

/// Write a six-point contour whose EAR equals `ratio`
fn place_eye(points: &mut [FacePoint], indices: &[usize; 6], center: FacePoint, ratio: f64) {
    let half_w = EYE_WIDTH / 2.0;
    let lid_x = EYE_WIDTH / 6.0;
    let half_h = EYE_WIDTH * ratio / 2.0;

    let contour = [
        FacePoint::new(center.x - half_w, center.y),
        FacePoint::new(center.x - lid_x, center.y - half_h),
        FacePoint::new(center.x + lid_x, center.y - half_h),
        FacePoint::new(center.x + half_w, center.y),
        FacePoint::new(center.x + lid_x, center.y + half_h),
        FacePoint::new(center.x - lid_x, center.y + half_h),
    ];
    for (&index, point) in indices.iter().zip(contour) {
        points[index] = point;
    }
}

impl LandmarkSource for SimulatedSource {
    fn name(&self) -> &str {
        "simulated"
    }

    fn is_ready(&self) -> bool {
        let seen = self.polls.get();
        if seen >= self.config.load_delay_polls {
            return true;
        }
        self.polls.set(seen.saturating_add(1));
        false
    }

    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, LandmarkError> {
        if self.closed {
            return Ok(None);
        }
        if let Some(limit) = self.config.frames {
            if self.frame_index >= limit {
                return Ok(None);
            }
        }

        let index = self.frame_index;
        self.frame_index += 1;

        if let Some(every) = self.config.failure_every {
            if every > 0 && (index + 1) % every == 0 {
                return Err(LandmarkError::Detection(format!("simulated failure on frame {}", index)));
            }
        }

        let timestamp_ms = index as f64 * self.config.frame_interval_ms;
        Ok(Some(LandmarkFrame::new(timestamp_ms, vec![self.face_at(index)])))
    }

    fn close(&mut self) {
        if !self.closed {
            debug!("Closing simulated source after {} frames", self.frame_index);
            self.closed = true;
        }
    }
}
