use std::sync::Arc;

use thiserror::Error;

use crate::detection::domain::detector_options::DetectorOptions;
use crate::detection::domain::native_face::NativeFace;
use crate::shared::bitmap::Bitmap;

/// Failure reported by a detection engine. The message is kept verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type NativeFaces = Vec<Box<dyn NativeFace>>;

/// Completion callback for one detection request.
pub type DetectionCallback = Box<dyn FnOnce(Result<NativeFaces, EngineError>) + Send>;

/// Domain interface for a platform face-detection engine.
///
/// The engine hands out one session per call, configured up front.
pub trait FaceDetectionEngine: Send + Sync {
    /// The configuration the engine uses for any field a caller leaves unset.
    fn default_options(&self) -> DetectorOptions {
        DetectorOptions::default()
    }

    fn open_session(
        &self,
        options: &DetectorOptions,
    ) -> Result<Arc<dyn FaceDetectorSession>, EngineError>;
}

/// A configured detector instance, scoped to a single call.
pub trait FaceDetectorSession: Send + Sync {
    /// Issues detection and returns without waiting.
    ///
    /// `on_complete` is invoked at most once, possibly from another thread.
    /// An engine that gives up on a request may drop it instead.
    fn detect_in_image(&self, image: Bitmap, on_complete: DetectionCallback);

    /// Releases the model resources held by this session.
    fn close(&self);
}
