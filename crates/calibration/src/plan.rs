//! Calibration target layout and timing

use std::time::Duration;

use geometry::{ScreenPoint, ScreenSize};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Axis fractions of the default 3x3 grid
const DEFAULT_AXIS_FRACTIONS: [f64; 3] = [0.1, 0.5, 0.9];

/// Calibration targets as fractions of the screen axes, in visiting order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationGrid {
    pub targets: Vec<(f64, f64)>,
}

impl CalibrationGrid {
    /// Row-major grid from per-axis fractions
    pub fn from_axis_fractions(xs: &[f64], ys: &[f64]) -> Self {
        let targets = ys
            .iter()
            .flat_map(|&fy| xs.iter().map(move |&fx| (fx, fy)))
            .collect();
        Self { targets }
    }

    /// Number of targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets scaled to the given screen
    pub fn targets(&self, screen: ScreenSize) -> Vec<ScreenPoint> {
        self.targets
            .iter()
            .map(|&(fx, fy)| screen.at_fraction(fx, fy))
            .collect()
    }
}

impl Default for CalibrationGrid {
    fn default() -> Self {
        Self::from_axis_fractions(&DEFAULT_AXIS_FRACTIONS, &DEFAULT_AXIS_FRACTIONS)
    }
}

/// How long each target is shown before and during capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellTiming {
    /// Settle time before the first target is captured (ms)
    pub first_settle_ms: u64,
    /// Settle time for every following target (ms)
    pub settle_ms: u64,
    /// Hold time between the end of settling and the capture (ms)
    pub capture_ms: u64,
}

impl Default for DwellTiming {
    fn default() -> Self {
        Self {
            first_settle_ms: 3000,
            settle_ms: 2000,
            capture_ms: 1500,
        }
    }
}

/// Calibration sequence configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub grid: CalibrationGrid,
    pub timing: DwellTiming,
}

/// One target of a calibration plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationStep {
    /// Position in the plan, from 0
    pub index: usize,
    /// Where the user should look
    pub target: ScreenPoint,
    /// Time to let the gaze settle on the target
    pub settle: Duration,
    /// Time from the end of settling until the capture
    pub capture: Duration,
}

impl CalibrationStep {
    /// Total time spent on this target
    pub fn dwell(&self) -> Duration {
        self.settle + self.capture
    }
}

/// Ordered calibration steps for a given screen
#[derive(Debug, Clone)]
pub struct CalibrationPlan {
    steps: Vec<CalibrationStep>,
}

impl CalibrationPlan {
    pub fn new(config: &CalibrationConfig, screen: ScreenSize) -> Self {
        let timing = config.timing;
        let steps = config
            .grid
            .targets(screen)
            .into_iter()
            .enumerate()
            .map(|(index, target)| CalibrationStep {
                index,
                target,
                settle: Duration::from_millis(if index == 0 {
                    timing.first_settle_ms
                } else {
                    timing.settle_ms
                }),
                capture: Duration::from_millis(timing.capture_ms),
            })
            .collect();

        Self { steps }
    }

    pub fn steps(&self) -> &[CalibrationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time from the start of the first step to the last capture
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(CalibrationStep::dwell).sum()
    }

    /// Start walking the plan
    pub fn start(self) -> CalibrationRun {
        info!(
            "Calibration plan: {} targets, {:.1}s total",
            self.steps.len(),
            self.total_duration().as_secs_f64()
        );
        CalibrationRun {
            steps: self.steps,
            position: 0,
        }
    }
}

/// Cursor over the steps of a plan
#[derive(Debug, Clone)]
pub struct CalibrationRun {
    steps: Vec<CalibrationStep>,
    position: usize,
}

impl CalibrationRun {
    /// Step currently shown, `None` once every target has been captured
    pub fn current(&self) -> Option<&CalibrationStep> {
        self.steps.get(self.position)
    }

    /// Move to the next step and return it
    pub fn advance(&mut self) -> Option<&CalibrationStep> {
        if self.position < self.steps.len() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.steps.len()
    }

    /// Steps not yet completed, including the current one
    pub fn remaining(&self) -> usize {
        self.steps.len().saturating_sub(self.position)
    }
}
