/// Probability reported by the engine for a classifier that did not run.
pub const UNCOMPUTED_PROBABILITY: f32 = -1.0;

/// Tracking id reported by the engine when no id has been assigned.
pub const INVALID_ID: i32 = -1;

/// Engine default for the smallest face to report, as head width / image width.
pub const DEFAULT_MIN_FACE_SIZE: f32 = 0.1;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
