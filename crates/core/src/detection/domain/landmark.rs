use serde::{Deserialize, Serialize};

use crate::shared::point::Point3D;

/// Named anatomical point on a face, with the engine's raw integer code.
///
/// Serialized as the raw code so consumers keep the engine's numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum LandmarkType {
    /// Center of the bottom lip.
    MouthBottom = 0,
    /// Midpoint between the left mouth corner and the outer corner of the left eye.
    LeftCheek = 1,
    /// Midpoint of the left ear tip and left ear lobe.
    LeftEar = 3,
    /// Center of the left eye cavity.
    LeftEye = 4,
    /// Left mouth corner where the lips meet.
    MouthLeft = 5,
    /// Midpoint between the nostrils where the nose meets the face.
    NoseBase = 6,
    /// Midpoint between the right mouth corner and the outer corner of the right eye.
    RightCheek = 7,
    /// Midpoint of the right ear tip and right ear lobe.
    RightEar = 9,
    /// Center of the right eye cavity.
    RightEye = 10,
    /// Right mouth corner where the lips meet.
    MouthRight = 11,
}

impl LandmarkType {
    /// Canonical iteration order; output landmarks always follow it.
    pub const ALL: [LandmarkType; 10] = [
        LandmarkType::LeftCheek,
        LandmarkType::RightCheek,
        LandmarkType::LeftEar,
        LandmarkType::RightEar,
        LandmarkType::LeftEye,
        LandmarkType::RightEye,
        LandmarkType::NoseBase,
        LandmarkType::MouthBottom,
        LandmarkType::MouthLeft,
        LandmarkType::MouthRight,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }
}

impl From<LandmarkType> for i32 {
    fn from(t: LandmarkType) -> i32 {
        t.code()
    }
}

impl TryFrom<i32> for LandmarkType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown landmark type code {code}"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Landmark {
    #[serde(rename = "type")]
    pub kind: LandmarkType,
    pub position: Point3D,
}
