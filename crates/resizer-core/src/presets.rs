//! Social media size presets.
//!
//! A compiled-in table of recommended image sizes per platform. Platforms
//! and presets are listed in display order; the first preset of each
//! platform is the fallback when a lookup misses.

use serde::Serialize;

use crate::ResizeError;

/// Platforms with size presets, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    LinkedIn,
    YouTube,
}

impl Platform {
    /// All platforms in display order.
    pub const ALL: [Platform; 5] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::YouTube,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::YouTube => "YouTube",
        }
    }

    /// Parse a platform name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named fixed output size for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetEntry {
    pub platform: Platform,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

const fn entry(platform: Platform, label: &'static str, width: u32, height: u32) -> PresetEntry {
    PresetEntry {
        platform,
        label,
        width,
        height,
    }
}

static INSTAGRAM: [PresetEntry; 5] = [
    entry(Platform::Instagram, "Post Square (1080 X 1080)", 1080, 1080),
    entry(Platform::Instagram, "Post Portrait (1080 X 1350)", 1080, 1350),
    entry(Platform::Instagram, "Post Landscape (1080 X 566)", 1080, 566),
    entry(Platform::Instagram, "Story (1080 X 1920)", 1080, 1920),
    entry(Platform::Instagram, "Profile Picture (320 X 320)", 320, 320),
];

static FACEBOOK: [PresetEntry; 5] = [
    entry(Platform::Facebook, "Post (1200 X 630)", 1200, 630),
    entry(Platform::Facebook, "Cover (820 X 312)", 820, 312),
    entry(Platform::Facebook, "Story (1080 X 1920)", 1080, 1920),
    entry(Platform::Facebook, "Profile Picture (170 X 170)", 170, 170),
    entry(Platform::Facebook, "Event Cover (1920 X 1005)", 1920, 1005),
];

static TWITTER: [PresetEntry; 3] = [
    entry(Platform::Twitter, "Post (1600 X 900)", 1600, 900),
    entry(Platform::Twitter, "Header (1500 X 500)", 1500, 500),
    entry(Platform::Twitter, "Profile Picture (400 X 400)", 400, 400),
];

static LINKEDIN: [PresetEntry; 4] = [
    entry(Platform::LinkedIn, "Post (1200 X 627)", 1200, 627),
    entry(Platform::LinkedIn, "Cover (1584 X 396)", 1584, 396),
    entry(Platform::LinkedIn, "Profile Picture (400 X 400)", 400, 400),
    entry(Platform::LinkedIn, "Company Logo (300 X 300)", 300, 300),
];

static YOUTUBE: [PresetEntry; 3] = [
    entry(Platform::YouTube, "Thumbnail (1280 X 720)", 1280, 720),
    entry(Platform::YouTube, "Channel Banner (2560 X 1440)", 2560, 1440),
    entry(Platform::YouTube, "Channel Icon (800 X 800)", 800, 800),
];

/// Platforms in display order.
pub fn list_platforms() -> impl Iterator<Item = Platform> {
    Platform::ALL.into_iter()
}

/// Presets for one platform in display order.
pub fn list_presets(platform: Platform) -> &'static [PresetEntry] {
    match platform {
        Platform::Instagram => &INSTAGRAM,
        Platform::Facebook => &FACEBOOK,
        Platform::Twitter => &TWITTER,
        Platform::LinkedIn => &LINKEDIN,
        Platform::YouTube => &YOUTUBE,
    }
}

/// First preset of a platform. Every platform has at least one.
pub fn first_preset(platform: Platform) -> &'static PresetEntry {
    &list_presets(platform)[0]
}

/// Look up a preset by platform and exact label.
pub fn lookup(platform: Platform, label: &str) -> Result<&'static PresetEntry, ResizeError> {
    list_presets(platform)
        .iter()
        .find(|p| p.label == label)
        .ok_or_else(|| ResizeError::PresetNotFound {
            platform: platform.name().to_string(),
            preset: label.to_string(),
        })
}

/// Look up a preset by platform name and label.
pub fn lookup_by_name(platform: &str, label: &str) -> Result<&'static PresetEntry, ResizeError> {
    let platform = Platform::from_name(platform).ok_or_else(|| ResizeError::PresetNotFound {
        platform: platform.to_string(),
        preset: label.to_string(),
    })?;
    lookup(platform, label)
}
