pub mod contour;
pub mod detected_face;
pub mod detector_options;
pub mod face_detector;
pub mod face_normalizer;
pub mod landmark;
pub mod native_face;
pub mod options_mapper;
