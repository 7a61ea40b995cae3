use serde::Serialize;

use crate::detection::domain::contour::Contour;
use crate::detection::domain::landmark::Landmark;
use crate::shared::bounding_box::BoundingBox;

/// One face in the response, flattened to JSON-safe fields.
///
/// Empty landmark/contour lists and uncomputed values are left out of the
/// serialized object entirely so consumers can test for key presence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    pub bounds: BoundingBox,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Landmark>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contours: Vec<Contour>,
    pub head_euler_angle_y: f32,
    pub head_euler_angle_z: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_eye_open_probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_eye_open_probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smiling_probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<i32>,
}

/// Response of one detection call, faces in engine order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DetectionResult {
    pub faces: Vec<DetectedFace>,
}

impl DetectionResult {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::landmark::LandmarkType;
    use crate::shared::point::Point3D;
    use serde_json::json;

    fn bare_face() -> DetectedFace {
        DetectedFace {
            bounds: BoundingBox::new(0, 0, 10, 20),
            landmarks: Vec::new(),
            contours: Vec::new(),
            head_euler_angle_y: 1.5,
            head_euler_angle_z: -2.25,
            left_eye_open_probability: None,
            right_eye_open_probability: None,
            smiling_probability: None,
            tracking_id: None,
        }
    }

    #[test]
    fn test_bare_face_has_only_bounds_and_angles() {
        let value = serde_json::to_value(bare_face()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["bounds", "headEulerAngleY", "headEulerAngleZ"]);
        assert_eq!(value["headEulerAngleY"], json!(1.5));
        assert_eq!(value["headEulerAngleZ"], json!(-2.25));
    }

    #[test]
    fn test_populated_face_uses_camel_case_keys() {
        let face = DetectedFace {
            landmarks: vec![Landmark {
                kind: LandmarkType::LeftEye,
                position: Point3D::new(3.0, 4.0, None),
            }],
            left_eye_open_probability: Some(0.5),
            right_eye_open_probability: Some(0.25),
            smiling_probability: Some(0.0),
            tracking_id: Some(7),
            ..bare_face()
        };
        let value = serde_json::to_value(face).unwrap();
        assert_eq!(value["landmarks"][0]["type"], json!(4));
        assert_eq!(value["leftEyeOpenProbability"], json!(0.5));
        assert_eq!(value["rightEyeOpenProbability"], json!(0.25));
        assert_eq!(value["smilingProbability"], json!(0.0));
        assert_eq!(value["trackingId"], json!(7));
        assert!(value.get("contours").is_none());
    }

    #[test]
    fn test_empty_result_serializes_empty_faces_array() {
        assert_eq!(
            DetectionResult::default().to_json().unwrap(),
            json!({"faces": []})
        );
    }
}
