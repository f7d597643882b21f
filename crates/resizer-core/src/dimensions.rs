//! Target dimension resolution.
//!
//! Turns the original image size and a [`ResizeConfiguration`] into the
//! exact output size. All rounding is round-half-up done in integer
//! arithmetic, so results never depend on float formatting.

use serde::{Deserialize, Serialize};

use crate::config::MAX_DIMENSION;
use crate::presets;
use crate::settings::{ResizeConfiguration, ResizeMode};
use crate::ResizeError;

/// Smallest accepted percentage.
pub const MIN_PERCENTAGE: u32 = 10;
/// Largest accepted percentage.
pub const MAX_PERCENTAGE: u32 = 200;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fail with `InvalidSourceDimensions` if either side is zero.
    pub fn ensure_valid(self) -> Result<Self, ResizeError> {
        if self.width == 0 || self.height == 0 {
            return Err(ResizeError::InvalidSourceDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The dimension a user edited last in size mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    Width,
    Height,
}

/// `round(edited * other_original / edited_original)`, rounding half up.
///
/// `edited_original` must be non-zero.
pub fn scale_axis(edited: u32, edited_original: u32, other_original: u32) -> u32 {
    let num = edited as u64 * other_original as u64;
    let den = edited_original as u64;
    ((2 * num + den) / (2 * den)) as u32
}

/// `round(value * pct / 100)`, rounding half up.
pub fn scale_percent(value: u32, pct: u32) -> u32 {
    ((value as u64 * pct as u64 + 50) / 100) as u32
}

/// Clamp a percentage into the accepted range.
pub fn clamp_percentage(pct: u32) -> u32 {
    pct.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE)
}

/// Compute the aspect-locked pair for an edit on `axis`.
///
/// The edited value is clamped to `[1, max_dimension]` first; the derived
/// value is clamped to the same range afterwards.
pub fn locked_pair(
    original: Dimensions,
    axis: Axis,
    value: u32,
    max_dimension: u32,
) -> Result<Dimensions, ResizeError> {
    let original = original.ensure_valid()?;
    let clamp = |v: u32| v.clamp(1, max_dimension.max(1));
    let edited = clamp(value);

    Ok(match axis {
        Axis::Width => Dimensions::new(
            edited,
            clamp(scale_axis(edited, original.width, original.height)),
        ),
        Axis::Height => Dimensions::new(
            clamp(scale_axis(edited, original.height, original.width)),
            edited,
        ),
    })
}

/// Resolve the output size using the default dimension limit.
pub fn resolve(
    original: Dimensions,
    config: &ResizeConfiguration,
) -> Result<Dimensions, ResizeError> {
    resolve_with_limit(original, config, MAX_DIMENSION)
}

/// Resolve the output size for `config` against `original`.
pub fn resolve_with_limit(
    original: Dimensions,
    config: &ResizeConfiguration,
    max_dimension: u32,
) -> Result<Dimensions, ResizeError> {
    let original = original.ensure_valid()?;
    let clamp = |v: u32| v.clamp(1, max_dimension.max(1));

    let resolved = match config.mode {
        ResizeMode::BySize if config.maintain_aspect_ratio => {
            let edited = match config.last_edited {
                Axis::Width => config.width,
                Axis::Height => config.height,
            };
            locked_pair(original, config.last_edited, edited, max_dimension)?
        }
        ResizeMode::BySize => Dimensions::new(clamp(config.width), clamp(config.height)),
        ResizeMode::ByPercentage => {
            let pct = clamp_percentage(config.percentage);
            Dimensions::new(
                clamp(scale_percent(original.width, pct)),
                clamp(scale_percent(original.height, pct)),
            )
        }
        ResizeMode::ByPreset => {
            let entry = presets::lookup(config.platform, &config.preset)?;
            Dimensions::new(entry.width, entry.height)
        }
    };

    log::debug!(
        "resolved {:?} {} -> {}",
        config.mode,
        original,
        resolved
    );
    Ok(resolved)
}
