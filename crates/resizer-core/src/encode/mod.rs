//! Image encoding for resize output.
//!
//! This module provides functionality for:
//! - Encoding RGBA surfaces to JPEG and WebP with configurable quality
//! - Encoding to PNG and GIF, which ignore quality
//!
//! # Examples
//!
//! ```ignore
//! use resizer_core::encode::encode;
//! use resizer_core::MediaType;
//!
//! let bytes = encode(&surface, MediaType::Jpeg, 0.9).unwrap();
//! ```

mod gif;
mod jpeg;
mod png;
mod webp;

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::validate::MediaType;

pub use jpeg::{encode_jpeg, quality_percent};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: &'static str, reason: String },
}

/// Encode an RGBA surface to `format`.
///
/// `quality` is in `[0.1, 1.0]`; it affects JPEG and WebP output.
pub fn encode(image: &DecodedImage, format: MediaType, quality: f32) -> Result<Vec<u8>, EncodeError> {
    check_surface(&image.pixels, image.width, image.height, 4)?;

    match format {
        MediaType::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, quality_percent(quality)),
        MediaType::Png => png::encode_png(&image.pixels, image.width, image.height),
        MediaType::Webp => webp::encode_webp(&image.pixels, image.width, image.height, quality_percent(quality)),
        MediaType::Gif => gif::encode_gif(&image.pixels, image.width, image.height),
    }
}

/// Validate dimensions and buffer length before handing pixels to an encoder.
pub(crate) fn check_surface(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;

    fn surface(width: u32, height: u32) -> DecodedImage {
        DecodedImage::from_rgba_image(gradient(width, height))
    }

    #[test]
    fn test_encode_magic_bytes() {
        let img = surface(20, 10);

        let jpeg = encode(&img, MediaType::Jpeg, 0.9).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode(&img, MediaType::Png, 0.9).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");

        let webp = encode(&img, MediaType::Webp, 0.9).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");

        let gif = encode(&img, MediaType::Gif, 0.9).unwrap();
        assert_eq!(&gif[0..3], b"GIF");
    }

    #[test]
    fn test_quality_ignored_for_lossless_formats() {
        let img = surface(24, 24);
        for format in [MediaType::Png, MediaType::Gif] {
            let low = encode(&img, format, 0.1).unwrap();
            let high = encode(&img, format, 1.0).unwrap();
            assert_eq!(low, high, "{format:?} should ignore quality");
        }
    }

    #[test]
    fn test_quality_applies_to_lossy_formats() {
        let img = surface(64, 64);
        for format in [MediaType::Jpeg, MediaType::Webp] {
            assert!(format.supports_quality());
            let low = encode(&img, format, 0.1).unwrap();
            let high = encode(&img, format, 1.0).unwrap();
            assert_ne!(low, high, "{format:?} should honor quality");
        }
    }

    #[test]
    fn test_encoded_output_decodes_to_same_size() {
        let img = surface(31, 17);
        for format in [MediaType::Jpeg, MediaType::Png, MediaType::Webp, MediaType::Gif] {
            let bytes = encode(&img, format, 0.8).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (31, 17), "{format:?}");
        }
    }

    #[test]
    fn test_png_preserves_pixels() {
        let img = surface(8, 8);
        let bytes = encode(&img, MediaType::Png, 1.0).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.into_raw(), img.pixels);
    }

    #[test]
    fn test_encode_rejects_bad_surface() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 10],
        };
        assert!(matches!(
            encode(&img, MediaType::Png, 0.9),
            Err(EncodeError::InvalidPixelData { expected: 400, actual: 10 })
        ));

        let empty = DecodedImage {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        assert!(matches!(
            encode(&empty, MediaType::Gif, 0.9),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
