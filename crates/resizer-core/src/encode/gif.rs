//! GIF encoding. Colors are quantized to a 256-entry palette; only the
//! first frame of an animated source survives decoding.

use image::codecs::gif::GifEncoder;
use image::ExtendedColorType;

use super::EncodeError;

/// NeuQuant sampling factor; 10 is the encoder's recommended default.
const QUANTIZE_SPEED: i32 = 10;

pub(super) fn encode_gif(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    let map_err = |e: image::ImageError| EncodeError::EncodingFailed {
        format: "GIF",
        reason: e.to_string(),
    };

    let mut buffer = Vec::new();
    {
        // The trailer is written when the encoder drops.
        let mut encoder = GifEncoder::new_with_speed(&mut buffer, QUANTIZE_SPEED);
        encoder
            .encode(pixels, width, height, ExtendedColorType::Rgba8)
            .map_err(map_err)?;
    }
    Ok(buffer)
}
