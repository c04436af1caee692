//! Geometry Primitives
//!
//! Points in the two coordinate spaces used by the gaze pipeline and the
//! scalar helpers shared by every stage above them.

mod math;
mod point;

pub use math::{distance, lerp};
pub use point::{FacePoint, Planar, ScreenPoint, ScreenSize};
