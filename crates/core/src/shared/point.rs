use serde::{Deserialize, Serialize};

/// A 2D or 3D point in image pixel coordinates, origin upper-left.
///
/// `z` is depth. Engines only report it for some landmarks; when they don't,
/// the key is left out of the serialized point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Point3D {
    pub fn new(x: f32, y: f32, z: Option<f32>) -> Self {
        Self { x, y, z }
    }
}
