//! Resampling a decoded surface to exact output dimensions.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions, stretching to fill.
///
/// The aspect ratio is not preserved: the whole source is drawn onto a
/// `width x height` surface. Returns a new image; the input is untouched.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target side is zero,
/// and `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image
        .as_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgba_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient;

    fn test_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::from_rgba_image(gradient(width, height))
    }

    #[test]
    fn test_resize_downscale() {
        let resized = resize(&test_image(100, 50), 50, 25, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_upscale() {
        let resized = resize(&test_image(50, 25), 100, 50, FilterType::Lanczos3).unwrap();
        assert_eq!((resized.width, resized.height), (100, 50));
    }

    #[test]
    fn test_resize_stretches_without_letterbox() {
        // Square source into a wide target: every output pixel is drawn
        let src = DecodedImage::new(10, 10, vec![200u8; 10 * 10 * 4]);
        let resized = resize(&src, 40, 5, FilterType::Nearest).unwrap();
        assert_eq!((resized.width, resized.height), (40, 5));
        assert!(resized.pixels.iter().all(|&v| v == 200));
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = test_image(100, 50);
        assert_eq!(resize(&img, 100, 50, FilterType::Bilinear).unwrap(), img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = test_image(100, 50);
        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_buffer_mismatch() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Bilinear),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_all_filter_types() {
        let img = test_image(100, 50);
        for filter in [FilterType::Nearest, FilterType::Bilinear, FilterType::Lanczos3] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!((resized.width, resized.height), (50, 25));
        }
    }

    #[test]
    fn test_resize_deterministic() {
        let img = test_image(64, 48);
        let a = resize(&img, 37, 23, FilterType::Lanczos3).unwrap();
        let b = resize(&img, 37, 23, FilterType::Lanczos3).unwrap();
        assert_eq!(a, b);
    }
}
