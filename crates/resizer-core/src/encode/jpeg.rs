//! JPEG encoding for export.
//!
//! Transparent pixels are flattened onto black, the same result a canvas
//! produces when exporting an RGBA surface as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{check_surface, EncodeError};

/// Map a `[0.1, 1.0]` quality to the `1..=100` scale of the lossy encoders.
pub fn quality_percent(quality: f32) -> u8 {
    if quality.is_nan() {
        return 90;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_surface(pixels, width, height, 4)?;

    let rgb: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|px| {
            let a = px[3] as u16;
            [px[0], px[1], px[2]].map(|c| ((c as u16 * a + 127) / 255) as u8)
        })
        .collect();

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            reason: e.to_string(),
        })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgba(width: usize, height: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]);
            }
        }
        pixels
    }

    #[test]
    fn test_quality_percent_mapping() {
        assert_eq!(quality_percent(0.9), 90);
        assert_eq!(quality_percent(0.1), 10);
        assert_eq!(quality_percent(1.0), 100);
        assert_eq!(quality_percent(0.0), 1);
        assert_eq!(quality_percent(7.0), 100);
        assert_eq!(quality_percent(f32::NAN), 90);
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&gradient_rgba(100, 100), 100, 100, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_affects_size() {
        let pixels = gradient_rgba(64, 64);
        let low = encode_jpeg(&pixels, 64, 64, 10).unwrap();
        let high = encode_jpeg(&pixels, 64, 64, 100).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_transparent_flattens_to_black() {
        let pixels = vec![255u8, 255, 255, 0].repeat(16 * 16);
        let jpeg = encode_jpeg(&pixels, 16, 16, 100).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap().into_rgb8();
        assert!(decoded.pixels().all(|p| p.0.iter().all(|&c| c < 8)));
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let result = encode_jpeg(&vec![128u8; 99 * 100 * 4], 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_width() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid input always produces a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 1u8..=100,
            alpha in any::<u8>(),
        ) {
            let pixels = [100u8, 150, 200, alpha].repeat((width * height) as usize);
            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: same input always produces the same bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let pixels: Vec<u8> = (0..(width * height * 4) as usize).map(|i| (i * 37 % 256) as u8).collect();
            let a = encode_jpeg(&pixels, width, height, quality).unwrap();
            let b = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: every float quality maps into the encoder range.
        #[test]
        fn prop_quality_in_range(quality in -10.0f32..=10.0) {
            prop_assert!((1..=100).contains(&quality_percent(quality)));
        }
    }
}
