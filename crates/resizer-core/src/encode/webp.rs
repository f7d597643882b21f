//! WebP encoding.
//!
//! The image crate only ships a lossless WebP encoder, so quality below 100
//! is applied by snapping RGB channels to fewer levels first. Coarser
//! channels compress smaller; alpha is left untouched. Quality 100 is
//! lossless.

use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_surface, EncodeError};

/// Encode RGBA pixel data to WebP at `quality` (1-100).
pub(super) fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_surface(pixels, width, height, 4)?;

    let mut rgba = pixels.to_vec();
    quantize_rgb(&mut rgba, quality);

    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(&rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "WebP",
            reason: e.to_string(),
        })?;
    Ok(buffer)
}

/// Snap each RGB channel to one of `levels_for_quality(quality)` evenly
/// spaced values.
fn quantize_rgb(data: &mut [u8], quality: u8) {
    if quality >= 100 {
        return;
    }
    let step = 255.0 / (f32::from(levels_for_quality(quality)) - 1.0);
    for pixel in data.chunks_exact_mut(4) {
        for channel in pixel.iter_mut().take(3) {
            let bucket = (f32::from(*channel) / step).round();
            *channel = (bucket * step).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Levels per channel, from 2 at quality 1 up to 256 at quality 100.
/// Quadratic so high qualities keep fine gradients.
fn levels_for_quality(quality: u8) -> u16 {
    if quality >= 100 {
        return 256;
    }
    let normalized = f32::from(quality.max(1)) / 100.0;
    (2.0 + normalized * normalized * 254.0).round().clamp(2.0, 256.0) as u16
}
