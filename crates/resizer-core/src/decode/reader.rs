//! Decoding of uploaded bytes with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};
use crate::dimensions::Dimensions;
use crate::validate::MediaType;

/// Decode image bytes into an RGBA surface, applying EXIF orientation.
///
/// The format is sniffed from the bytes; the declared `media` type is used
/// only when sniffing fails.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes are truncated, corrupt
/// or not an image.
pub fn decode(bytes: &[u8], media: MediaType) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let img = reader(bytes, media)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    let decoded = DecodedImage::from_rgba_image(oriented.into_rgba8());
    if decoded.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: decoded.width,
            height: decoded.height,
        });
    }
    Ok(decoded)
}

/// Read display dimensions from the image header without decoding pixels.
///
/// Dimensions are reported after orientation correction, matching what the
/// browser shows for the same file. Zero sizes are returned as-is; the
/// caller decides whether they are acceptable.
pub fn probe_dimensions(bytes: &[u8], media: MediaType) -> Result<Dimensions, DecodeError> {
    let (width, height) = reader(bytes, media)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if extract_orientation(bytes).swaps_dimensions() {
        Ok(Dimensions::new(height, width))
    } else {
        Ok(Dimensions::new(width, height))
    }
}

/// Extract the EXIF orientation value (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn reader(bytes: &[u8], media: MediaType) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        reader.set_format(media.image_format());
    }
    Ok(reader)
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
