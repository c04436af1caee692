//! Face Landmark Input
//!
//! Frames of normalized face landmarks as delivered by a face-mesh detector:
//! - Frame and per-face landmark types
//! - FaceMesh index layout for eye contours and iris centers
//! - `LandmarkSource` trait with replay and simulated implementations
//! - Bounded readiness wait for detectors that load asynchronously

pub mod frame;
pub mod layout;
pub mod readiness;
pub mod replay;
pub mod simulated;

pub use frame::{FaceLandmarks, LandmarkFrame};
pub use layout::LandmarkLayout;
pub use readiness::{wait_until_ready, ReadinessPolicy};
pub use replay::ReplaySource;
pub use simulated::{SimulatedConfig, SimulatedSource};

use thiserror::Error;

/// Landmark source errors
#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("Landmark detector not available after {attempts} attempts")]
    Unavailable { attempts: u32 },

    #[error("Detection failed: {0}")]
    Detection(String),

    #[error("Invalid frame on line {line}: {reason}")]
    Decode { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LandmarkError {
    fn from(err: std::io::Error) -> Self {
        LandmarkError::Io(err.to_string())
    }
}

/// Producer of landmark frames
///
/// Frames are pulled one at a time by a single consumer.
pub trait LandmarkSource {
    /// Human-readable source name for logs
    fn name(&self) -> &str;

    /// Whether the underlying detector has finished loading
    fn is_ready(&self) -> bool;

    /// Next frame, `Ok(None)` at end of stream
    ///
    /// An `Err` describes one failed frame; later calls may succeed.
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, LandmarkError>;

    /// Release the detector
    fn close(&mut self);
}
