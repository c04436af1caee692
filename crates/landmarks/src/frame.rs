//! Landmark frame types

use geometry::FacePoint;
use serde::{Deserialize, Serialize};

/// Landmarks of one detected face, addressed by index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub points: Vec<FacePoint>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<FacePoint>) -> Self {
        Self { points }
    }

    /// Landmark at `index`, `None` if the mesh is shorter
    pub fn get(&self, index: usize) -> Option<FacePoint> {
        self.points.get(index).copied()
    }

    /// Landmarks at each of `indices`, in order
    pub fn select(&self, indices: &[usize]) -> Vec<Option<FacePoint>> {
        indices.iter().map(|&i| self.get(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Detector output for one camera frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Capture timestamp (milliseconds, monotonic)
    pub timestamp_ms: f64,
    /// Detected faces, possibly empty
    #[serde(default)]
    pub faces: Vec<FaceLandmarks>,
}

impl LandmarkFrame {
    pub fn new(timestamp_ms: f64, faces: Vec<FaceLandmarks>) -> Self {
        Self { timestamp_ms, faces }
    }

    /// Frame with no detected face
    pub fn empty(timestamp_ms: f64) -> Self {
        Self::new(timestamp_ms, Vec::new())
    }

    /// The face used for tracking; any others are ignored
    pub fn primary_face(&self) -> Option<&FaceLandmarks> {
        self.faces.first()
    }
}
