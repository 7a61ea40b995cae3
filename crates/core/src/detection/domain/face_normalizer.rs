//! Engine-native face records to response faces.
//!
//! Every sentinel comparison happens here; nothing past this module sees an
//! `UNCOMPUTED_PROBABILITY` or `INVALID_ID`.

use crate::detection::domain::contour::{Contour, ContourType};
use crate::detection::domain::detected_face::{DetectedFace, DetectionResult};
use crate::detection::domain::landmark::{Landmark, LandmarkType};
use crate::detection::domain::native_face::{NativeFace, NativePoint};
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{INVALID_ID, UNCOMPUTED_PROBABILITY};
use crate::shared::point::Point3D;

/// Normalizes every face, keeping the engine's order.
pub fn normalize_faces(faces: &[Box<dyn NativeFace>]) -> DetectionResult {
    DetectionResult {
        faces: faces.iter().map(|f| normalize_face(f.as_ref())).collect(),
    }
}

pub fn normalize_face(face: &dyn NativeFace) -> DetectedFace {
    let rect = face.bounding_box();

    DetectedFace {
        bounds: BoundingBox::new(rect.left, rect.top, rect.right, rect.bottom),
        landmarks: collect_landmarks(face),
        contours: collect_contours(face),
        head_euler_angle_y: finite_angle("headEulerAngleY", face.head_euler_angle_y()),
        head_euler_angle_z: finite_angle("headEulerAngleZ", face.head_euler_angle_z()),
        left_eye_open_probability: computed_probability(face.left_eye_open_probability()),
        right_eye_open_probability: computed_probability(face.right_eye_open_probability()),
        smiling_probability: computed_probability(face.smiling_probability()),
        tracking_id: valid_tracking_id(face.tracking_id()),
    }
}

fn collect_landmarks(face: &dyn NativeFace) -> Vec<Landmark> {
    LandmarkType::ALL
        .iter()
        .filter_map(|&kind| {
            face.landmark(kind).map(|point| Landmark {
                kind,
                position: to_point(point),
            })
        })
        .collect()
}

fn collect_contours(face: &dyn NativeFace) -> Vec<Contour> {
    ContourType::ALL
        .iter()
        .filter_map(|&kind| {
            let points = face.contour(kind)?;
            if points.is_empty() {
                return None;
            }
            Some(Contour {
                kind,
                points: points.into_iter().map(to_point).collect(),
            })
        })
        .collect()
}

fn to_point(p: NativePoint) -> Point3D {
    Point3D::new(p.x, p.y, p.z)
}

/// Angles are always emitted; a non-finite one is reported as level.
fn finite_angle(name: &str, value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("Engine reported {name} = {value}, using 0");
        0.0
    }
}

/// Non-finite values would serialize as `null`, so they count as uncomputed too.
fn computed_probability(value: f32) -> Option<f32> {
    (value.is_finite() && value != UNCOMPUTED_PROBABILITY).then_some(value)
}

fn valid_tracking_id(id: i32) -> Option<i32> {
    (id != INVALID_ID).then_some(id)
}
