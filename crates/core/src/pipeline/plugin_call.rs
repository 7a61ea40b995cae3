use serde_json::Value;

use crate::detection::infrastructure::image_decoder::ImageDecodeError;

use super::detect_error::DetectError;

pub const IMAGE_KEY: &str = "image";
pub const OPTIONS_KEY: &str = "options";

/// One invocation from the host bridge.
///
/// Settling consumes the call, so a call is resolved or rejected at most once.
pub trait PluginCall: Send {
    /// The arguments the host passed, expected to be a JSON object.
    fn data(&self) -> &Value;

    fn resolve(self: Box<Self>, result: Value);

    fn reject(self: Box<Self>, error: DetectError);
}

/// The `detectInImage` arguments pulled out of a call's data.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectRequest {
    pub image: String,
    pub options: Option<Value>,
}

impl DetectRequest {
    /// An `image` that is absent or not a string counts as missing.
    pub fn from_value(data: &Value) -> Result<Self, DetectError> {
        let args = data
            .as_object()
            .ok_or_else(|| DetectError::internal("call data must be an object"))?;
        let image = args
            .get(IMAGE_KEY)
            .and_then(Value::as_str)
            .ok_or(ImageDecodeError::Missing)?;
        Ok(Self {
            image: image.to_string(),
            options: args.get(OPTIONS_KEY).cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::detect_error::ErrorKind;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_reads_image_and_options() {
        let request =
            DetectRequest::from_value(&json!({"image": "aGVsbG8=", "options": {"contourMode": 2}}))
                .unwrap();
        assert_eq!(request.image, "aGVsbG8=");
        assert_eq!(request.options, Some(json!({"contourMode": 2})));
    }

    #[test]
    fn test_options_may_be_omitted() {
        let request = DetectRequest::from_value(&json!({"image": "aGVsbG8="})).unwrap();
        assert_eq!(request.options, None);
    }

    #[rstest]
    #[case::absent(json!({}))]
    #[case::null(json!({"image": null}))]
    #[case::number(json!({"image": 42}))]
    fn test_missing_image(#[case] data: Value) {
        let err = DetectRequest::from_value(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.to_string(), "Must provide an image");
    }

    #[test]
    fn test_non_object_data_is_internal() {
        let err = DetectRequest::from_value(&json!("aGVsbG8=")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
