//! Resize configuration and its reducer.
//!
//! The configuration is only ever changed through [`reduce`], a pure
//! function from `(configuration, action)` to a new configuration. Paired
//! updates (an aspect-locked width edit also moving the height, a preset
//! selection also moving both dimensions) happen inside a single call, so
//! callers never observe a half-applied state.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::dimensions::{self, clamp_percentage, scale_percent, Axis, Dimensions};
use crate::presets::{self, Platform};
use crate::validate::MediaType;
use crate::ResizeError;

/// Lowest accepted quality.
pub const MIN_QUALITY: f32 = 0.1;
/// Highest accepted quality.
pub const MAX_QUALITY: f32 = 1.0;

/// How the target size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeMode {
    /// Explicit width and height.
    #[default]
    BySize,
    /// A percentage of the original size.
    ByPercentage,
    /// A fixed platform preset.
    ByPreset,
}

impl ResizeMode {
    /// Parse the mode names used by the page (`bySize`, `asPercentage`,
    /// `socialMedia`) as well as the variant names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bySize" | "BySize" => Some(ResizeMode::BySize),
            "asPercentage" | "ByPercentage" => Some(ResizeMode::ByPercentage),
            "socialMedia" | "ByPreset" => Some(ResizeMode::ByPreset),
            _ => None,
        }
    }

    /// The page's name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            ResizeMode::BySize => "bySize",
            ResizeMode::ByPercentage => "asPercentage",
            ResizeMode::ByPreset => "socialMedia",
        }
    }
}

/// Output encoding choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Keep the source media type.
    #[default]
    Original,
    Jpg,
    Png,
    Webp,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "original" => Some(ExportFormat::Original),
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            "png" => Some(ExportFormat::Png),
            "webp" => Some(ExportFormat::Webp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Original => "original",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Webp => "webp",
        }
    }

    /// The media type actually written for a given source.
    pub fn output_type(self, source: MediaType) -> MediaType {
        match self {
            ExportFormat::Original => source,
            ExportFormat::Jpg => MediaType::Jpeg,
            ExportFormat::Png => MediaType::Png,
            ExportFormat::Webp => MediaType::Webp,
        }
    }
}

/// Unit for the advisory target file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    Kb,
    Mb,
}

impl SizeUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "kb" => Some(SizeUnit::Kb),
            "mb" => Some(SizeUnit::Mb),
            _ => None,
        }
    }
}

/// Advisory output size budget. Recorded, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetFileSize {
    pub amount: f64,
    pub unit: SizeUnit,
}

impl TargetFileSize {
    /// Budget in bytes.
    pub fn bytes(&self) -> u64 {
        let scale = match self.unit {
            SizeUnit::Kb => 1024.0,
            SizeUnit::Mb => 1024.0 * 1024.0,
        };
        (self.amount.max(0.0) * scale).round() as u64
    }
}

/// How the source is placed on the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitMode {
    /// Scale to fill the whole surface.
    #[default]
    Stretch,
    /// Keep proportions and fill the rest with a background. Not implemented
    /// by the render engine; rendered as `Stretch`.
    Letterbox,
}

impl FitMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "stretch" => Some(FitMode::Stretch),
            "letterbox" => Some(FitMode::Letterbox),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FitMode::Stretch => "stretch",
            FitMode::Letterbox => "letterbox",
        }
    }
}

/// Everything the user can adjust before resizing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeConfiguration {
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
    pub maintain_aspect_ratio: bool,
    /// Axis the user edited last; drives aspect-locked recomputation.
    pub last_edited: Axis,
    pub quality: f32,
    pub percentage: u32,
    pub platform: Platform,
    pub preset: String,
    pub format: ExportFormat,
    pub target_file_size: Option<TargetFileSize>,
    pub fit: FitMode,
}

impl Default for ResizeConfiguration {
    fn default() -> Self {
        let platform = Platform::Instagram;
        Self {
            mode: ResizeMode::BySize,
            width: 800,
            height: 600,
            maintain_aspect_ratio: true,
            last_edited: Axis::Width,
            quality: 0.9,
            percentage: 100,
            platform,
            preset: presets::first_preset(platform).label.to_string(),
            format: ExportFormat::Original,
            target_file_size: None,
            fit: FitMode::Stretch,
        }
    }
}

impl ResizeConfiguration {
    /// Defaults for a freshly selected image: width capped at the engine's
    /// default width, height following the aspect lock.
    pub fn seeded(original: Dimensions, engine: &EngineConfig) -> Result<Self, ResizeError> {
        let base = Self::default();
        let width = original.width.min(engine.default_width);
        let pair = dimensions::locked_pair(original, Axis::Width, width, engine.max_dimension)?;
        Ok(Self {
            width: pair.width,
            height: pair.height,
            ..base
        })
    }

    /// Current width and height as a pair.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// A single user intent applied by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    SetWidth(u32),
    SetHeight(u32),
    SetMaintainAspectRatio(bool),
    SetQuality(f32),
    SetPercentage(u32),
    SetMode(ResizeMode),
    SelectPlatform(String),
    SelectPreset(String),
    SetFormat(ExportFormat),
    SetTargetFileSize(Option<TargetFileSize>),
    SetFit(FitMode),
}

/// Apply `action` to `state`, returning the next configuration.
///
/// `original` is the loaded image's size. On error the caller keeps
/// `state` unchanged.
pub fn reduce(
    state: &ResizeConfiguration,
    action: ConfigAction,
    original: Dimensions,
    engine: &EngineConfig,
) -> Result<ResizeConfiguration, ResizeError> {
    let mut next = state.clone();

    match action {
        ConfigAction::SetWidth(value) => edit_dimension(&mut next, Axis::Width, value, original, engine)?,
        ConfigAction::SetHeight(value) => edit_dimension(&mut next, Axis::Height, value, original, engine)?,
        ConfigAction::SetMaintainAspectRatio(lock) => {
            // Presets impose their own fixed, non-proportional size.
            if next.mode == ResizeMode::ByPreset {
                return Ok(next);
            }
            next.maintain_aspect_ratio = lock;
            if lock && next.mode == ResizeMode::BySize {
                relock(&mut next, original, engine)?;
            }
        }
        ConfigAction::SetQuality(quality) => {
            next.quality = if quality.is_nan() {
                state.quality
            } else {
                quality.clamp(MIN_QUALITY, MAX_QUALITY)
            };
        }
        ConfigAction::SetPercentage(pct) => {
            next.percentage = clamp_percentage(pct);
            if next.mode == ResizeMode::ByPercentage {
                apply_percentage(&mut next, original, engine)?;
            }
        }
        ConfigAction::SetMode(mode) => {
            next.mode = mode;
            match mode {
                ResizeMode::BySize if next.maintain_aspect_ratio => {
                    relock(&mut next, original, engine)?
                }
                ResizeMode::BySize => {}
                ResizeMode::ByPercentage => apply_percentage(&mut next, original, engine)?,
                ResizeMode::ByPreset => {
                    next.maintain_aspect_ratio = false;
                    apply_preset(&mut next);
                }
            }
        }
        ConfigAction::SelectPlatform(name) => {
            let platform = Platform::from_name(&name).ok_or_else(|| ResizeError::PresetNotFound {
                platform: name.clone(),
                preset: String::new(),
            })?;
            next.platform = platform;
            next.preset = presets::first_preset(platform).label.to_string();
            if next.mode == ResizeMode::ByPreset {
                apply_preset(&mut next);
            }
        }
        ConfigAction::SelectPreset(label) => {
            next.preset = match presets::lookup(next.platform, &label) {
                Ok(entry) => entry.label.to_string(),
                Err(err) => {
                    log::warn!("{err}; falling back to first preset");
                    presets::first_preset(next.platform).label.to_string()
                }
            };
            if next.mode == ResizeMode::ByPreset {
                apply_preset(&mut next);
            }
        }
        ConfigAction::SetFormat(format) => next.format = format,
        ConfigAction::SetTargetFileSize(target) => next.target_file_size = target,
        ConfigAction::SetFit(fit) => next.fit = fit,
    }

    Ok(next)
}

fn edit_dimension(
    next: &mut ResizeConfiguration,
    axis: Axis,
    value: u32,
    original: Dimensions,
    engine: &EngineConfig,
) -> Result<(), ResizeError> {
    // Width and height are derived outside size mode.
    if next.mode != ResizeMode::BySize {
        return Ok(());
    }

    next.last_edited = axis;
    if next.maintain_aspect_ratio {
        apply_pair(
            next,
            dimensions::locked_pair(original, axis, value, engine.max_dimension)?,
        );
    } else {
        match axis {
            Axis::Width => next.width = engine.clamp_dimension(value),
            Axis::Height => next.height = engine.clamp_dimension(value),
        }
    }
    Ok(())
}

/// Re-derive the paired axis from the one edited last.
fn relock(
    next: &mut ResizeConfiguration,
    original: Dimensions,
    engine: &EngineConfig,
) -> Result<(), ResizeError> {
    let edited = match next.last_edited {
        Axis::Width => next.width,
        Axis::Height => next.height,
    };
    let pair = dimensions::locked_pair(original, next.last_edited, edited, engine.max_dimension)?;
    apply_pair(next, pair);
    Ok(())
}

fn apply_pair(next: &mut ResizeConfiguration, pair: Dimensions) {
    next.width = pair.width;
    next.height = pair.height;
}

fn apply_percentage(
    next: &mut ResizeConfiguration,
    original: Dimensions,
    engine: &EngineConfig,
) -> Result<(), ResizeError> {
    let original = original.ensure_valid()?;
    let pct = next.percentage;
    next.width = engine.clamp_dimension(scale_percent(original.width, pct));
    next.height = engine.clamp_dimension(scale_percent(original.height, pct));
    Ok(())
}

fn apply_preset(next: &mut ResizeConfiguration) {
    let entry = presets::lookup(next.platform, &next.preset)
        .unwrap_or_else(|_| presets::first_preset(next.platform));
    next.preset = entry.label.to_string();
    next.width = entry.width;
    next.height = entry.height;
}
