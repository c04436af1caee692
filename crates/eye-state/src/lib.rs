//! Eye State Detection
//!
//! Eye-openness and blink classification from the six contour landmarks of
//! each eye, using the Eye Aspect Ratio (EAR):
//!
//! ```text
//! EAR = (|p2 - p6| + |p3 - p5|) / (2 * |p1 - p4|)
//! ```
//!
//! Contour order is `[outer-corner, upper-lid-1, upper-lid-2, inner-corner,
//! lower-lid-1, lower-lid-2]`.

mod detector;
mod ear;

pub use detector::{BlinkDetector, EyeState, DEFAULT_BLINK_THRESHOLD};
pub use ear::{eye_aspect_ratio, EYE_CONTOUR_POINTS, OPEN_EYE_EAR};
