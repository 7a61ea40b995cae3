use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_MIN_FACE_SIZE;

macro_rules! engine_mode {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "i32", try_from = "i32")]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> i32 {
                self as i32
            }

            pub fn from_code(code: i64) -> Option<Self> {
                Self::ALL.iter().copied().find(|m| i64::from(m.code()) == code)
            }
        }

        impl From<$name> for i32 {
            fn from(m: $name) -> i32 {
                m.code()
            }
        }

        impl TryFrom<i32> for $name {
            type Error = String;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                Self::from_code(i64::from(code))
                    .ok_or_else(|| format!("unknown {} code {code}", stringify!($name)))
            }
        }
    };
}

engine_mode! {
    /// Speed/accuracy trade-off.
    PerformanceMode {
        /// Fewer faces, less precise positions, faster.
        Fast = 1,
        /// More faces, more precise positions, slower.
        Accurate = 2,
    }
}

engine_mode! {
    LandmarkMode {
        None = 1,
        All = 2,
    }
}

engine_mode! {
    /// Whether the "eyes open" and "smiling" classifiers run.
    ClassificationMode {
        None = 1,
        All = 2,
    }
}

engine_mode! {
    ContourMode {
        None = 1,
        All = 2,
    }
}

/// The sparse option set a caller actually asked for.
///
/// `None` means "leave the engine default alone". Tracking is a plain bool
/// because only an explicit `true` changes anything.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectionOptionsInput {
    pub performance_mode: Option<PerformanceMode>,
    pub landmark_mode: Option<LandmarkMode>,
    pub classification_mode: Option<ClassificationMode>,
    pub contour_mode: Option<ContourMode>,
    pub min_face_size: Option<f32>,
    pub enable_tracking: bool,
}

impl DetectionOptionsInput {
    /// True when resolving against any defaults yields those defaults unchanged.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully-resolved detector configuration handed to an engine.
///
/// Built in one step; there is no partially-configured state.
/// `Default` is the platform engine's own defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorOptions {
    performance_mode: PerformanceMode,
    landmark_mode: LandmarkMode,
    classification_mode: ClassificationMode,
    contour_mode: ContourMode,
    min_face_size: f32,
    tracking_enabled: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            performance_mode: PerformanceMode::Fast,
            landmark_mode: LandmarkMode::None,
            classification_mode: ClassificationMode::None,
            contour_mode: ContourMode::None,
            min_face_size: DEFAULT_MIN_FACE_SIZE,
            tracking_enabled: false,
        }
    }
}

impl DetectorOptions {
    /// Overlays the requested fields onto `defaults`.
    pub fn resolve(input: &DetectionOptionsInput, defaults: &DetectorOptions) -> Self {
        Self {
            performance_mode: input.performance_mode.unwrap_or(defaults.performance_mode),
            landmark_mode: input.landmark_mode.unwrap_or(defaults.landmark_mode),
            classification_mode: input
                .classification_mode
                .unwrap_or(defaults.classification_mode),
            contour_mode: input.contour_mode.unwrap_or(defaults.contour_mode),
            min_face_size: input.min_face_size.unwrap_or(defaults.min_face_size),
            tracking_enabled: input.enable_tracking || defaults.tracking_enabled,
        }
    }

    /// Engine-side constructor for engines whose defaults differ from the platform's.
    pub fn engine_defaults(
        performance_mode: PerformanceMode,
        landmark_mode: LandmarkMode,
        classification_mode: ClassificationMode,
        contour_mode: ContourMode,
        min_face_size: f32,
        tracking_enabled: bool,
    ) -> Self {
        Self {
            performance_mode,
            landmark_mode,
            classification_mode,
            contour_mode,
            min_face_size,
            tracking_enabled,
        }
    }

    pub fn performance_mode(&self) -> PerformanceMode {
        self.performance_mode
    }

    pub fn landmark_mode(&self) -> LandmarkMode {
        self.landmark_mode
    }

    pub fn classification_mode(&self) -> ClassificationMode {
        self.classification_mode
    }

    pub fn contour_mode(&self) -> ContourMode {
        self.contour_mode
    }

    pub fn min_face_size(&self) -> f32 {
        self.min_face_size
    }

    pub fn tracking_enabled(&self) -> bool {
        self.tracking_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn custom_defaults() -> DetectorOptions {
        DetectorOptions::engine_defaults(
            PerformanceMode::Accurate,
            LandmarkMode::All,
            ClassificationMode::All,
            ContourMode::All,
            0.25,
            false,
        )
    }

    #[test]
    fn test_platform_defaults() {
        let d = DetectorOptions::default();
        assert_eq!(d.performance_mode(), PerformanceMode::Fast);
        assert_eq!(d.landmark_mode(), LandmarkMode::None);
        assert_eq!(d.classification_mode(), ClassificationMode::None);
        assert_eq!(d.contour_mode(), ContourMode::None);
        assert_relative_eq!(d.min_face_size(), 0.1);
        assert!(!d.tracking_enabled());
    }

    #[test]
    fn test_empty_input_resolves_to_defaults() {
        let input = DetectionOptionsInput::default();
        assert!(input.is_empty());
        assert_eq!(
            DetectorOptions::resolve(&input, &DetectorOptions::default()),
            DetectorOptions::default()
        );
        assert_eq!(
            DetectorOptions::resolve(&input, &custom_defaults()),
            custom_defaults()
        );
    }

    #[test]
    fn test_absent_fields_take_engine_defaults_not_platform_ones() {
        let input = DetectionOptionsInput {
            landmark_mode: Some(LandmarkMode::None),
            ..Default::default()
        };
        let resolved = DetectorOptions::resolve(&input, &custom_defaults());
        assert_eq!(resolved.landmark_mode(), LandmarkMode::None);
        assert_eq!(resolved.performance_mode(), PerformanceMode::Accurate);
        assert_eq!(resolved.classification_mode(), ClassificationMode::All);
        assert_eq!(resolved.contour_mode(), ContourMode::All);
        assert_relative_eq!(resolved.min_face_size(), 0.25);
    }

    #[test]
    fn test_present_fields_override_defaults() {
        let input = DetectionOptionsInput {
            performance_mode: Some(PerformanceMode::Accurate),
            landmark_mode: Some(LandmarkMode::All),
            classification_mode: Some(ClassificationMode::All),
            contour_mode: Some(ContourMode::All),
            min_face_size: Some(0.5),
            enable_tracking: true,
        };
        assert!(!input.is_empty());
        let resolved = DetectorOptions::resolve(&input, &DetectorOptions::default());
        assert_eq!(resolved.performance_mode(), PerformanceMode::Accurate);
        assert_eq!(resolved.landmark_mode(), LandmarkMode::All);
        assert_eq!(resolved.classification_mode(), ClassificationMode::All);
        assert_eq!(resolved.contour_mode(), ContourMode::All);
        assert_relative_eq!(resolved.min_face_size(), 0.5);
        assert!(resolved.tracking_enabled());
    }

    #[rstest]
    #[case(1, Some(PerformanceMode::Fast))]
    #[case(2, Some(PerformanceMode::Accurate))]
    #[case(0, None)]
    #[case(3, None)]
    fn test_performance_mode_codes(#[case] code: i64, #[case] expected: Option<PerformanceMode>) {
        assert_eq!(PerformanceMode::from_code(code), expected);
    }

    #[test]
    fn test_modes_serialize_as_raw_codes() {
        assert_eq!(serde_json::to_value(ContourMode::All).unwrap(), 2);
        assert_eq!(serde_json::to_value(LandmarkMode::None).unwrap(), 1);
        let parsed: ClassificationMode = serde_json::from_value(serde_json::json!(2)).unwrap();
        assert_eq!(parsed, ClassificationMode::All);
    }
}
