use serde::{Deserialize, Serialize};

use crate::shared::point::Point3D;

/// Facial feature outlined by a contour, with the engine's raw integer code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ContourType {
    AllPoints = 1,
    Face = 2,
    LeftEyebrowTop = 3,
    LeftEyebrowBottom = 4,
    RightEyebrowTop = 5,
    RightEyebrowBottom = 6,
    LeftEye = 7,
    RightEye = 8,
    UpperLipTop = 9,
    UpperLipBottom = 10,
    LowerLipTop = 11,
    LowerLipBottom = 12,
    NoseBridge = 13,
    NoseBottom = 14,
}

impl ContourType {
    /// Canonical iteration order (ascending engine code).
    pub const ALL: [ContourType; 14] = [
        ContourType::AllPoints,
        ContourType::Face,
        ContourType::LeftEyebrowTop,
        ContourType::LeftEyebrowBottom,
        ContourType::RightEyebrowTop,
        ContourType::RightEyebrowBottom,
        ContourType::LeftEye,
        ContourType::RightEye,
        ContourType::UpperLipTop,
        ContourType::UpperLipBottom,
        ContourType::LowerLipTop,
        ContourType::LowerLipBottom,
        ContourType::NoseBridge,
        ContourType::NoseBottom,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }
}

impl From<ContourType> for i32 {
    fn from(t: ContourType) -> i32 {
        t.code()
    }
}

impl TryFrom<i32> for ContourType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown contour type code {code}"))
    }
}

/// Ordered polyline around one feature. `points` is never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contour {
    #[serde(rename = "type")]
    pub kind: ContourType,
    pub points: Vec<Point3D>,
}
