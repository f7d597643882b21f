//! Resizer Core - client-side image resizing
//!
//! This crate holds everything the image resizer does apart from talking to
//! the browser: upload validation, the resize configuration and its reducer,
//! output size resolution, the social media preset catalog, the render
//! engine (decode, resample, encode) and the session state machine that
//! ties them together.
//!
//! All work happens in memory on bytes handed in by the caller.

pub mod config;
pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod error;
pub mod presets;
pub mod render;
pub mod session;
pub mod settings;
pub mod validate;

pub use config::EngineConfig;
pub use dimensions::{resolve, Axis, Dimensions};
pub use error::ResizeError;
pub use presets::{list_platforms, list_presets, Platform, PresetEntry};
pub use render::{render, RenderOptions, ResizeOutput, SourceImage};
pub use session::{
    Download, ImageFile, JobTicket, RenderJob, ResizeCompletion, ResizeSession, SessionState,
};
pub use settings::{
    reduce, ConfigAction, ExportFormat, FitMode, ResizeConfiguration, ResizeMode, SizeUnit,
    TargetFileSize,
};
pub use validate::{validate, MediaType};

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use image::{DynamicImage, Rgba, RgbaImage};

    use crate::validate::MediaType;

    /// An opaque gradient, distinct enough that resampling has work to do.
    pub fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) % 256) as u8;
            Rgba([r, g, b, 255])
        })
    }

    /// Encode a fixture in the given container format.
    pub fn encode_fixture(image: &RgbaImage, media: MediaType) -> Vec<u8> {
        let dynamic = match media {
            // JPEG has no alpha channel
            MediaType::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).into_rgb8()),
            _ => DynamicImage::ImageRgba8(image.clone()),
        };
        let mut cursor = Cursor::new(Vec::new());
        dynamic
            .write_to(&mut cursor, media.image_format())
            .expect("fixture encodes");
        cursor.into_inner()
    }
}
