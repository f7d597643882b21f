//! The render engine: decode, resample, encode.
//!
//! One call turns a [`SourceImage`] into a [`ResizeOutput`] of exactly the
//! requested size. The source is never mutated and nothing leaves process
//! memory. Identical inputs produce byte-identical output.

use std::sync::Arc;

use crate::decode::{self, FilterType};
use crate::dimensions::Dimensions;
use crate::encode;
use crate::settings::{ExportFormat, FitMode, TargetFileSize};
use crate::validate::MediaType;
use crate::ResizeError;

/// A validated upload held by the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub name: String,
    pub media_type: MediaType,
    /// Display dimensions (after EXIF orientation).
    pub dimensions: Dimensions,
    bytes: Arc<[u8]>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, media_type: MediaType, dimensions: Dimensions, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            media_type,
            dimensions,
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Settings for one render beyond the target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub quality: f32,
    pub format: ExportFormat,
    pub filter: FilterType,
    pub fit: FitMode,
    pub target_file_size: Option<TargetFileSize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            quality: 0.9,
            format: ExportFormat::Original,
            filter: FilterType::Bilinear,
            fit: FitMode::Stretch,
            target_file_size: None,
        }
    }
}

/// An encoded resize result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOutput {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
    pub dimensions: Dimensions,
    /// Suggested download name, `resized_<original name>`.
    pub filename: String,
}

impl ResizeOutput {
    pub fn mime(&self) -> &'static str {
        self.media_type.mime()
    }
}

/// Render `source` at `target` size.
///
/// # Errors
///
/// `DecodeFailed` if the source bytes cannot be decoded or resampled,
/// `EncodeFailed` if the encoder rejects the surface.
pub fn render(
    source: &SourceImage,
    target: Dimensions,
    options: &RenderOptions,
) -> Result<ResizeOutput, ResizeError> {
    if options.fit == FitMode::Letterbox {
        log::warn!("letterbox fit is not supported; stretching to fill");
    }

    let decoded = decode::decode(source.bytes(), source.media_type)?;
    let surface = decode::resize(&decoded, target.width, target.height, options.filter)?;

    let media_type = options.format.output_type(source.media_type);
    let bytes = encode::encode(&surface, media_type, options.quality)?;

    if let Some(budget) = options.target_file_size {
        let limit = budget.bytes();
        if bytes.len() as u64 > limit {
            log::info!(
                "output is {} bytes, over the advisory {} byte target",
                bytes.len(),
                limit
            );
        }
    }

    log::info!(
        "rendered {} {} -> {} {} ({} bytes)",
        source.media_type.mime(),
        source.dimensions,
        media_type.mime(),
        target,
        bytes.len()
    );

    Ok(ResizeOutput {
        bytes,
        media_type,
        dimensions: target,
        filename: output_filename(&source.name, source.media_type, media_type),
    })
}

/// `resized_<name>`, with the extension swapped when the output type
/// differs from the source type.
pub fn output_filename(name: &str, source: MediaType, output: MediaType) -> String {
    if source == output {
        return format!("resized_{name}");
    }
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    format!("resized_{stem}.{}", output.extension())
}
