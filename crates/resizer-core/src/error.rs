//! Unified error type for the resize workflow.
//!
//! Every failure the session can report maps to one `ResizeError` variant.
//! Lower layers (`DecodeError`, `EncodeError`) convert into it so callers
//! only ever match on a single enum.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors surfaced by the resize engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// The declared media type is not one of the accepted image types.
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    /// The file exceeds the configured byte limit.
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    /// The source reported a zero width or height.
    #[error("Invalid source dimensions: {width}x{height}")]
    InvalidSourceDimensions { width: u32, height: u32 },

    /// Platform or preset name is not in the catalog.
    #[error("Preset not found: {platform} / {preset}")]
    PresetNotFound { platform: String, preset: String },

    /// The source bytes could not be decoded.
    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    /// The encoder rejected the surface or parameters.
    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),

    /// Download requested before a resize produced an output.
    #[error("No resized image available")]
    NoOutputAvailable,

    /// A resize is already in flight.
    #[error("A resize is already in progress")]
    OperationBusy,

    /// Configuration or resize requested with no image loaded.
    #[error("No image selected")]
    NoImageSelected,
}

impl ResizeError {
    /// Text shown to the user in the page's single message field.
    pub fn user_message(&self) -> String {
        match self {
            ResizeError::UnsupportedType(_) => {
                "Unsupported file type. Please use JPG, PNG, WebP, or GIF.".to_string()
            }
            ResizeError::FileTooLarge { limit, .. } => format!(
                "File size exceeds {}MB limit. Please upgrade for larger files.",
                limit / (1024 * 1024)
            ),
            ResizeError::InvalidSourceDimensions { .. } => {
                "This image reports no usable dimensions. Please try another file.".to_string()
            }
            ResizeError::PresetNotFound { .. } => {
                "The selected preset is not available.".to_string()
            }
            ResizeError::DecodeFailed(_) => "Failed to load image".to_string(),
            ResizeError::EncodeFailed(_) => "Failed to create blob".to_string(),
            ResizeError::NoOutputAvailable => "Resize the image before downloading.".to_string(),
            ResizeError::OperationBusy => "Processing...".to_string(),
            ResizeError::NoImageSelected => "No file selected".to_string(),
        }
    }
}

impl From<DecodeError> for ResizeError {
    fn from(err: DecodeError) -> Self {
        ResizeError::DecodeFailed(err.to_string())
    }
}

impl From<EncodeError> for ResizeError {
    fn from(err: EncodeError) -> Self {
        ResizeError::EncodeFailed(err.to_string())
    }
}
