pub mod call_status;
pub mod detect_error;
pub mod detect_faces_use_case;
pub mod infrastructure;
pub mod plugin_call;
