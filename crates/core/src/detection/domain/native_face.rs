use serde::Deserialize;

use crate::detection::domain::contour::ContourType;
use crate::detection::domain::landmark::LandmarkType;

/// Edge rectangle as reported by an engine, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct NativeRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl NativeRect {
    /// Wraps on overflow, like the platform rect.
    pub fn width(&self) -> i32 {
        self.right.wrapping_sub(self.left)
    }
}

/// Point as reported by an engine. Depth is nullable on the platform side.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct NativePoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: Option<f32>,
}

/// One face record in the engine's own shape.
///
/// Mirrors the platform API: lookups by kind return `None` when the engine
/// did not report that feature, while probabilities and the tracking id use
/// in-band sentinels (`UNCOMPUTED_PROBABILITY`, `INVALID_ID`) instead of an
/// optional type.
pub trait NativeFace: Send {
    fn bounding_box(&self) -> NativeRect;

    fn landmark(&self, kind: LandmarkType) -> Option<NativePoint>;

    fn contour(&self, kind: ContourType) -> Option<Vec<NativePoint>>;

    /// Rotation about the vertical axis, in degrees.
    fn head_euler_angle_y(&self) -> f32;

    /// Rotation about the axis pointing out of the image, in degrees.
    fn head_euler_angle_z(&self) -> f32;

    fn left_eye_open_probability(&self) -> f32;

    fn right_eye_open_probability(&self) -> f32;

    fn smiling_probability(&self) -> f32;

    fn tracking_id(&self) -> i32;
}
