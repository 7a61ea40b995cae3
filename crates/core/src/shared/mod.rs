pub mod bitmap;
pub mod bounding_box;
pub mod constants;
pub mod point;
