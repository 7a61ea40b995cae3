use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;

use crate::shared::bitmap::Bitmap;

/// Standard alphabet; trailing `=` padding is optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("Must provide an image")]
    Missing,
    #[error("{0}")]
    Base64(#[source] base64::DecodeError),
    #[error("{0}")]
    Raster(#[source] image::ImageError),
}

/// Decodes a base64 image payload into an upright RGB [`Bitmap`].
///
/// ASCII whitespace is ignored so line-wrapped payloads decode the same as
/// single-line ones.
pub fn decode_base64_image(content: &str) -> Result<Bitmap, ImageDecodeError> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = PAYLOAD_ENGINE
        .decode(compact.as_bytes())
        .map_err(ImageDecodeError::Base64)?;
    decode_image_bytes(&bytes)
}

pub fn decode_image_bytes(bytes: &[u8]) -> Result<Bitmap, ImageDecodeError> {
    let rgb = image::load_from_memory(bytes)
        .map_err(ImageDecodeError::Raster)?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Bitmap::new(rgb.into_raw(), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32, color: [u8; 3]) -> String {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb(color));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        STANDARD.encode(&buf)
    }

    #[test]
    fn test_decodes_png_dimensions_and_pixels() {
        let bitmap = decode_base64_image(&encoded_png(4, 3, [50, 100, 200])).unwrap();
        assert_eq!(bitmap.width(), 4);
        assert_eq!(bitmap.height(), 3);
        assert_eq!(bitmap.data().len(), 4 * 3 * 3);
        assert_eq!(bitmap.pixel(3, 2), Some([50, 100, 200]));
    }

    #[test]
    fn test_ignores_line_wrapping() {
        let encoded = encoded_png(2, 2, [255, 0, 0]);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(16)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        let bitmap = decode_base64_image(&wrapped).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some([255, 0, 0]));
    }

    #[test]
    fn test_accepts_unpadded_payload() {
        let padded = (1..32)
            .map(|width| encoded_png(width, 1, [0, 200, 0]))
            .find(|encoded| encoded.ends_with('='))
            .unwrap();
        let unpadded = padded.trim_end_matches('=');

        let bitmap = decode_base64_image(unpadded).unwrap();

        assert_eq!(bitmap.pixel(0, 0), Some([0, 200, 0]));
    }

    #[test]
    fn test_malformed_base64_is_base64_error() {
        let err = decode_base64_image("not*base64!").unwrap_err();
        assert!(matches!(err, ImageDecodeError::Base64(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_valid_base64_of_garbage_is_raster_error() {
        let err = decode_base64_image(&STANDARD.encode(b"definitely not an image")).unwrap_err();
        assert!(matches!(err, ImageDecodeError::Raster(_)));
    }

    #[test]
    fn test_empty_payload_is_raster_error() {
        let err = decode_base64_image("").unwrap_err();
        assert!(matches!(err, ImageDecodeError::Raster(_)));
    }

    #[test]
    fn test_missing_message() {
        assert_eq!(ImageDecodeError::Missing.to_string(), "Must provide an image");
    }
}
