//! Loosely-typed options bag to a resolved [`DetectorOptions`].
//!
//! A field that is present but unusable (wrong type, unknown code, bad
//! number) is treated as absent and logged. Only a bag that is not an object
//! at all fails.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::detection::domain::detector_options::{
    ClassificationMode, ContourMode, DetectionOptionsInput, DetectorOptions, LandmarkMode,
    PerformanceMode,
};

pub const PERFORMANCE_MODE_KEY: &str = "performanceMode";
pub const LANDMARK_MODE_KEY: &str = "landmarkMode";
pub const CLASSIFICATION_MODE_KEY: &str = "classificationMode";
pub const CONTOUR_MODE_KEY: &str = "contourMode";
pub const MIN_FACE_SIZE_KEY: &str = "minFaceSize";
pub const ENABLE_TRACKING_KEY: &str = "enableTracking";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("options must be an object, got {found}")]
    NotAnObject { found: &'static str },
}

/// Parses and resolves in one go. `None` and JSON `null` both mean "no options".
pub fn map_options(
    options: Option<&Value>,
    defaults: &DetectorOptions,
) -> Result<DetectorOptions, OptionsError> {
    let input = parse_options(options)?;
    if input.is_empty() {
        log::debug!("No usable options given, keeping engine defaults");
    }
    Ok(DetectorOptions::resolve(&input, defaults))
}

pub fn parse_options(options: Option<&Value>) -> Result<DetectionOptionsInput, OptionsError> {
    let bag = match options {
        None | Some(Value::Null) => return Ok(DetectionOptionsInput::default()),
        Some(Value::Object(bag)) => bag,
        Some(other) => {
            return Err(OptionsError::NotAnObject {
                found: json_type_name(other),
            })
        }
    };

    Ok(DetectionOptionsInput {
        performance_mode: mode_field(bag, PERFORMANCE_MODE_KEY, PerformanceMode::from_code),
        landmark_mode: mode_field(bag, LANDMARK_MODE_KEY, LandmarkMode::from_code),
        classification_mode: mode_field(
            bag,
            CLASSIFICATION_MODE_KEY,
            ClassificationMode::from_code,
        ),
        contour_mode: mode_field(bag, CONTOUR_MODE_KEY, ContourMode::from_code),
        min_face_size: min_face_size_field(bag),
        enable_tracking: matches!(bag.get(ENABLE_TRACKING_KEY), Some(Value::Bool(true))),
    })
}

fn mode_field<M>(
    bag: &Map<String, Value>,
    key: &str,
    from_code: impl Fn(i64) -> Option<M>,
) -> Option<M> {
    let value = present(bag, key)?;
    let mode = value.as_i64().and_then(from_code);
    if mode.is_none() {
        log::warn!("Ignoring {key}: expected a known mode code, got {value}");
    }
    mode
}

fn min_face_size_field(bag: &Map<String, Value>) -> Option<f32> {
    let value = present(bag, MIN_FACE_SIZE_KEY)?;
    let size = value
        .as_f64()
        .map(|v| v as f32)
        .filter(|v| v.is_finite() && *v > 0.0 && *v <= 1.0);
    if size.is_none() {
        log::warn!("Ignoring {MIN_FACE_SIZE_KEY}: expected a number in (0, 1], got {value}");
    }
    size
}

fn present<'a>(bag: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    bag.get(key).filter(|v| !v.is_null())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
