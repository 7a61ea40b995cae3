use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::contour::ContourType;
use crate::detection::domain::detector_options::{
    ClassificationMode, ContourMode, DetectorOptions, LandmarkMode,
};
use crate::detection::domain::face_detector::{
    DetectionCallback, EngineError, FaceDetectionEngine, FaceDetectorSession, NativeFaces,
};
use crate::detection::domain::landmark::LandmarkType;
use crate::detection::domain::native_face::{NativeFace, NativePoint, NativeRect};
use crate::shared::bitmap::Bitmap;
use crate::shared::constants::{INVALID_ID, UNCOMPUTED_PROBABILITY};

pub const CLOSED_SESSION_MESSAGE: &str = "Detector is closed";

#[derive(Error, Debug)]
pub enum RecordingLoadError {
    #[error("failed to read recording {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse recording {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A face record exactly as a platform engine reported it, sentinels included.
///
/// Landmarks and contours are keyed by the engine's raw type code.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedFace {
    pub bounding_box: NativeRect,
    #[serde(default)]
    pub landmarks: HashMap<i32, NativePoint>,
    #[serde(default)]
    pub contours: HashMap<i32, Vec<NativePoint>>,
    #[serde(default)]
    pub head_euler_angle_y: f32,
    #[serde(default)]
    pub head_euler_angle_z: f32,
    #[serde(default = "uncomputed")]
    pub left_eye_open_probability: f32,
    #[serde(default = "uncomputed")]
    pub right_eye_open_probability: f32,
    #[serde(default = "uncomputed")]
    pub smiling_probability: f32,
    #[serde(default = "invalid_id")]
    pub tracking_id: i32,
}

fn uncomputed() -> f32 {
    UNCOMPUTED_PROBABILITY
}

fn invalid_id() -> i32 {
    INVALID_ID
}

impl RecordedFace {
    pub fn new(bounding_box: NativeRect) -> Self {
        Self {
            bounding_box,
            landmarks: HashMap::new(),
            contours: HashMap::new(),
            head_euler_angle_y: 0.0,
            head_euler_angle_z: 0.0,
            left_eye_open_probability: UNCOMPUTED_PROBABILITY,
            right_eye_open_probability: UNCOMPUTED_PROBABILITY,
            smiling_probability: UNCOMPUTED_PROBABILITY,
            tracking_id: INVALID_ID,
        }
    }
}

/// Replays recorded engine output for every image it is given.
///
/// Applies the session's options the way the platform engine does, so a
/// recording captured with everything enabled can stand in for any
/// configuration.
pub struct RecordedFaceEngine {
    faces: Arc<Vec<RecordedFace>>,
    failure: Option<String>,
    defaults: DetectorOptions,
}

impl RecordedFaceEngine {
    pub fn new(faces: Vec<RecordedFace>) -> Self {
        Self {
            faces: Arc::new(faces),
            failure: None,
            defaults: DetectorOptions::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, RecordingLoadError> {
        let json = fs::read_to_string(path).map_err(|e| RecordingLoadError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| RecordingLoadError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Every detection completes with this engine failure instead of faces.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn with_defaults(mut self, defaults: DetectorOptions) -> Self {
        self.defaults = defaults;
        self
    }
}

impl FaceDetectionEngine for RecordedFaceEngine {
    fn default_options(&self) -> DetectorOptions {
        self.defaults
    }

    fn open_session(
        &self,
        options: &DetectorOptions,
    ) -> Result<Arc<dyn FaceDetectorSession>, EngineError> {
        Ok(Arc::new(RecordedSession {
            faces: Arc::clone(&self.faces),
            failure: self.failure.clone(),
            options: *options,
            closed: Arc::new(AtomicBool::new(false)),
        }))
    }
}

pub struct RecordedSession {
    faces: Arc<Vec<RecordedFace>>,
    failure: Option<String>,
    options: DetectorOptions,
    closed: Arc<AtomicBool>,
}

impl FaceDetectorSession for RecordedSession {
    fn detect_in_image(&self, image: Bitmap, on_complete: DetectionCallback) {
        let faces = Arc::clone(&self.faces);
        let failure = self.failure.clone();
        let options = self.options;
        let closed = Arc::clone(&self.closed);

        std::thread::spawn(move || {
            // The platform engine fails in-flight requests once its model is released.
            if closed.load(Ordering::SeqCst) {
                on_complete(Err(EngineError::new(CLOSED_SESSION_MESSAGE)));
                return;
            }
            if let Some(message) = failure {
                on_complete(Err(EngineError::new(message)));
                return;
            }
            on_complete(Ok(replay(&faces, &options, image.width())));
        });
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

fn replay(faces: &[RecordedFace], options: &DetectorOptions, image_width: u32) -> NativeFaces {
    let min_width = options.min_face_size() * image_width as f32;
    faces
        .iter()
        .filter(|f| f.bounding_box.width() as f32 >= min_width)
        .map(|f| -> Box<dyn NativeFace> {
            Box::new(ReplayedFace {
                face: f.clone(),
                options: *options,
            })
        })
        .collect()
}

impl NativeFace for RecordedFace {
    fn bounding_box(&self) -> NativeRect {
        self.bounding_box
    }

    fn landmark(&self, kind: LandmarkType) -> Option<NativePoint> {
        self.landmarks.get(&kind.code()).copied()
    }

    fn contour(&self, kind: ContourType) -> Option<Vec<NativePoint>> {
        self.contours.get(&kind.code()).cloned()
    }

    fn head_euler_angle_y(&self) -> f32 {
        self.head_euler_angle_y
    }

    fn head_euler_angle_z(&self) -> f32 {
        self.head_euler_angle_z
    }

    fn left_eye_open_probability(&self) -> f32 {
        self.left_eye_open_probability
    }

    fn right_eye_open_probability(&self) -> f32 {
        self.right_eye_open_probability
    }

    fn smiling_probability(&self) -> f32 {
        self.smiling_probability
    }

    fn tracking_id(&self) -> i32 {
        self.tracking_id
    }
}

/// A recorded face seen through one session's options.
struct ReplayedFace {
    face: RecordedFace,
    options: DetectorOptions,
}

impl ReplayedFace {
    fn classified(&self, probability: f32) -> f32 {
        match self.options.classification_mode() {
            ClassificationMode::All => probability,
            ClassificationMode::None => UNCOMPUTED_PROBABILITY,
        }
    }
}

impl NativeFace for ReplayedFace {
    fn bounding_box(&self) -> NativeRect {
        self.face.bounding_box()
    }

    fn landmark(&self, kind: LandmarkType) -> Option<NativePoint> {
        match self.options.landmark_mode() {
            LandmarkMode::All => self.face.landmark(kind),
            LandmarkMode::None => None,
        }
    }

    fn contour(&self, kind: ContourType) -> Option<Vec<NativePoint>> {
        match self.options.contour_mode() {
            ContourMode::All => self.face.contour(kind),
            ContourMode::None => None,
        }
    }

    fn head_euler_angle_y(&self) -> f32 {
        self.face.head_euler_angle_y()
    }

    fn head_euler_angle_z(&self) -> f32 {
        self.face.head_euler_angle_z()
    }

    fn left_eye_open_probability(&self) -> f32 {
        self.classified(self.face.left_eye_open_probability())
    }

    fn right_eye_open_probability(&self) -> f32 {
        self.classified(self.face.right_eye_open_probability())
    }

    fn smiling_probability(&self) -> f32 {
        self.classified(self.face.smiling_probability())
    }

    fn tracking_id(&self) -> i32 {
        if self.options.tracking_enabled() {
            self.face.tracking_id()
        } else {
            INVALID_ID
        }
    }
}
