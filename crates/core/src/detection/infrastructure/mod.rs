pub mod image_decoder;
pub mod recorded_face_engine;
