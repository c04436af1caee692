//! Landmark index layout

use geometry::FacePoint;
use serde::{Deserialize, Serialize};

use crate::frame::FaceLandmarks;

/// Indices of the eye and iris landmarks in a face mesh
///
/// Eye contours follow `[outer-corner, upper-lid-1, upper-lid-2,
/// inner-corner, lower-lid-1, lower-lid-2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkLayout {
    pub left_eye: [usize; 6],
    pub right_eye: [usize; 6],
    pub left_iris: usize,
    pub right_iris: usize,
}

impl LandmarkLayout {
    /// MediaPipe FaceMesh with refined iris landmarks (478 points)
    pub fn face_mesh() -> Self {
        Self {
            left_eye: [33, 160, 158, 133, 153, 144],
            right_eye: [362, 385, 387, 263, 373, 380],
            left_iris: 468,
            right_iris: 473,
        }
    }

    /// Smallest mesh length that contains every index
    pub fn mesh_len(&self) -> usize {
        self.left_eye
            .iter()
            .chain(self.right_eye.iter())
            .chain([self.left_iris, self.right_iris].iter())
            .max()
            .map_or(0, |&max| max + 1)
    }

    pub fn left_eye(&self, face: &FaceLandmarks) -> Vec<Option<FacePoint>> {
        face.select(&self.left_eye)
    }

    pub fn right_eye(&self, face: &FaceLandmarks) -> Vec<Option<FacePoint>> {
        face.select(&self.right_eye)
    }

    /// Midpoint of the two iris centers, `None` unless both are present
    /// and finite
    pub fn gaze_point(&self, face: &FaceLandmarks) -> Option<FacePoint> {
        let left = face.get(self.left_iris)?;
        let right = face.get(self.right_iris)?;
        Some(left.midpoint(&right)).filter(FacePoint::is_finite)
    }
}

impl Default for LandmarkLayout {
    fn default() -> Self {
        Self::face_mesh()
    }
}
