//! Image decoding for the render engine.
//!
//! This module provides functionality for:
//! - Probing the display dimensions of an upload without a full decode
//! - Decoding JPEG, PNG, WebP and GIF bytes into an RGBA surface
//! - Applying EXIF orientation the way a browser does when loading an image
//! - Resampling a surface to exact target dimensions
//!
//! # Architecture
//!
//! Decoding is used from Web Workers via WASM bindings. All operations are
//! synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use resizer_core::decode::{decode, resize, FilterType};
//! use resizer_core::MediaType;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode(&bytes, MediaType::Jpeg).unwrap();
//! let small = resize(&image, 800, 600, FilterType::Bilinear).unwrap();
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode, get_orientation, probe_dimensions};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
