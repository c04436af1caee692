//! Eye Aspect Ratio

use geometry::{distance, FacePoint};

/// Number of contour landmarks per eye
pub const EYE_CONTOUR_POINTS: usize = 6;

/// EAR reported when the contour is unusable (reads as fully open)
pub const OPEN_EYE_EAR: f64 = 1.0;

/// Compute the EAR of one eye
///
/// Returns [`OPEN_EYE_EAR`] when fewer than six points are given, when any
/// of them is missing, or when the corner-to-corner distance is zero.
pub fn eye_aspect_ratio(points: &[Option<FacePoint>]) -> f64 {
    if points.len() < EYE_CONTOUR_POINTS {
        return OPEN_EYE_EAR;
    }

    let [p1, p2, p3, p4, p5, p6] = match &points[..EYE_CONTOUR_POINTS] {
        [Some(p1), Some(p2), Some(p3), Some(p4), Some(p5), Some(p6)] => [*p1, *p2, *p3, *p4, *p5, *p6],
        _ => return OPEN_EYE_EAR,
    };

    let vertical_1 = distance(Some(&p2), Some(&p6));
    let vertical_2 = distance(Some(&p3), Some(&p5));
    let horizontal = distance(Some(&p1), Some(&p4));

    if horizontal == 0.0 {
        return OPEN_EYE_EAR;
    }

    (vertical_1 + vertical_2) / (2.0 * horizontal)
}
