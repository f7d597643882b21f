//! Engine configuration.
//!
//! Limits and defaults the session applies. Every field has a default, so a
//! partial object from JavaScript deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::validate::MAX_FILE_BYTES;

/// Largest width or height a user may request.
pub const MAX_DIMENSION: u32 = 5000;

/// Default target width when an image is selected.
pub const DEFAULT_WIDTH: u32 = 800;

/// Tunable limits and defaults for a resize session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum accepted upload size in bytes.
    pub max_file_bytes: u64,
    /// Upper bound for target width and height.
    pub max_dimension: u32,
    /// Width seeded on select (capped at the original width).
    pub default_width: u32,
    /// Resampling filter used by the render engine.
    pub filter: FilterType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_FILE_BYTES,
            max_dimension: MAX_DIMENSION,
            default_width: DEFAULT_WIDTH,
            filter: FilterType::Bilinear,
        }
    }
}

impl EngineConfig {
    /// Clamp a requested dimension into `[1, max_dimension]`.
    pub fn clamp_dimension(&self, value: u32) -> u32 {
        value.clamp(1, self.max_dimension.max(1))
    }
}
