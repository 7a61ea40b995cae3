use std::fmt;

use thiserror::Error;

use crate::detection::domain::face_detector::EngineError;
use crate::detection::domain::options_mapper::OptionsError;
use crate::detection::infrastructure::image_decoder::ImageDecodeError;

/// Why a detection call was rejected.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Decode(#[from] ImageDecodeError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Options,
    Engine,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Decode => "decode",
            ErrorKind::Options => "options",
            ErrorKind::Engine => "engine",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DetectError {
    pub fn internal(message: impl Into<String>) -> Self {
        DetectError::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DetectError::Decode(_) => ErrorKind::Decode,
            DetectError::Options(_) => ErrorKind::Options,
            DetectError::Engine(_) => ErrorKind::Engine,
            DetectError::Internal(_) => ErrorKind::Internal,
        }
    }
}
