//! Gaze Calibration
//!
//! Collects (screen point, face point) pairs while the user looks at a
//! sequence of on-screen targets:
//! - Sample store, reset on every calibration start
//! - Target grid (3x3 at 10/50/90% by default)
//! - Per-target settle/capture timing and run sequencing

pub mod plan;
pub mod store;

pub use plan::{CalibrationConfig, CalibrationGrid, CalibrationPlan, CalibrationRun, CalibrationStep, DwellTiming};
pub use store::{CalibrationSample, CalibrationStore};
