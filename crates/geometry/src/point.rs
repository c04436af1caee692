//! Point types for face space and screen space

use serde::{Deserialize, Serialize};

use crate::math::lerp;

/// Anything with planar x/y coordinates
pub trait Planar {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

/// Landmark position in normalized camera-frame coordinates
///
/// Roughly within [0, 1] on both axes, origin at the top-left of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FacePoint {
    pub x: f64,
    pub y: f64,
}

impl FacePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &FacePoint) -> FacePoint {
        FacePoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Planar for FacePoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Position on the display in pixels, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Interpolate towards `target` independently on each axis
    pub fn lerp(self, target: ScreenPoint, amount: f64) -> ScreenPoint {
        ScreenPoint {
            x: lerp(self.x, target.x, amount),
            y: lerp(self.y, target.y, amount),
        }
    }
}

impl Planar for ScreenPoint {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Current display dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the display, the fallback cursor position
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Point at the given fraction of each axis
    pub fn at_fraction(&self, fx: f64, fy: f64) -> ScreenPoint {
        ScreenPoint::new(fx * self.width, fy * self.height)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}
