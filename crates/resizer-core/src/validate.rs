//! File validation for incoming uploads.
//!
//! Checks the declared MIME type and byte size before any decoding happens.
//! Matching is case-sensitive on the string the browser hands us.

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::ResizeError;

/// Default upload limit: 10 MiB.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Image media types accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl MediaType {
    /// Parse a declared MIME type. `image/jpg` is accepted as a legacy alias.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            "image/webp" => Some(MediaType::Webp),
            "image/gif" => Some(MediaType::Gif),
            _ => None,
        }
    }

    /// Canonical MIME string.
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
            MediaType::Gif => "image/gif",
        }
    }

    /// File extension used when renaming downloads.
    pub fn extension(self) -> &'static str {
        match self {
            MediaType::Jpeg => "jpg",
            MediaType::Png => "png",
            MediaType::Webp => "webp",
            MediaType::Gif => "gif",
        }
    }

    /// Whether the quality setting changes the encoded output.
    pub fn supports_quality(self) -> bool {
        matches!(self, MediaType::Jpeg | MediaType::Webp)
    }

    /// The matching `image` crate format.
    pub fn image_format(self) -> ImageFormat {
        match self {
            MediaType::Jpeg => ImageFormat::Jpeg,
            MediaType::Png => ImageFormat::Png,
            MediaType::Webp => ImageFormat::WebP,
            MediaType::Gif => ImageFormat::Gif,
        }
    }
}

/// Validate a file against the default 10 MiB limit.
///
/// Type is checked before size, so an oversized PDF reports `UnsupportedType`.
pub fn validate(media_type: &str, byte_len: u64) -> Result<MediaType, ResizeError> {
    validate_with_limit(media_type, byte_len, MAX_FILE_BYTES)
}

/// Validate a file against an explicit byte limit.
pub fn validate_with_limit(
    media_type: &str,
    byte_len: u64,
    max_bytes: u64,
) -> Result<MediaType, ResizeError> {
    let media = MediaType::from_mime(media_type)
        .ok_or_else(|| ResizeError::UnsupportedType(media_type.to_string()))?;

    if byte_len > max_bytes {
        return Err(ResizeError::FileTooLarge {
            size: byte_len,
            limit: max_bytes,
        });
    }

    Ok(media)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_supported_types() {
        for (mime, expected) in [
            ("image/jpeg", MediaType::Jpeg),
            ("image/jpg", MediaType::Jpeg),
            ("image/png", MediaType::Png),
            ("image/webp", MediaType::Webp),
            ("image/gif", MediaType::Gif),
        ] {
            assert_eq!(validate(mime, 1024).unwrap(), expected);
        }
    }

    #[test]
    fn test_rejects_unsupported_type() {
        assert_eq!(
            validate("application/pdf", 1024),
            Err(ResizeError::UnsupportedType("application/pdf".to_string()))
        );
        assert!(validate("image/tiff", 1024).is_err());
        assert!(validate("", 0).is_err());
    }

    #[test]
    fn test_mime_match_is_case_sensitive() {
        assert!(matches!(
            validate("IMAGE/PNG", 10),
            Err(ResizeError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_size_limit_boundary() {
        assert!(validate("image/png", MAX_FILE_BYTES).is_ok());
        assert_eq!(
            validate("image/png", MAX_FILE_BYTES + 1),
            Err(ResizeError::FileTooLarge {
                size: MAX_FILE_BYTES + 1,
                limit: MAX_FILE_BYTES
            })
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        assert!(matches!(
            validate("application/pdf", MAX_FILE_BYTES * 2),
            Err(ResizeError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_custom_limit() {
        assert!(validate_with_limit("image/gif", 500, 1000).is_ok());
        assert!(matches!(
            validate_with_limit("image/gif", 1001, 1000),
            Err(ResizeError::FileTooLarge { limit: 1000, .. })
        ));
    }

    #[test]
    fn test_media_type_properties() {
        assert_eq!(MediaType::Jpeg.mime(), "image/jpeg");
        assert_eq!(MediaType::Webp.extension(), "webp");
        assert!(MediaType::Jpeg.supports_quality());
        assert!(MediaType::Webp.supports_quality());
        assert!(!MediaType::Png.supports_quality());
        assert!(!MediaType::Gif.supports_quality());
        assert_eq!(MediaType::Gif.image_format(), ImageFormat::Gif);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn accepted_mime() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["image/jpeg", "image/png", "image/webp", "image/gif"])
    }

    proptest! {
        /// Property: accepted types within the limit always validate.
        #[test]
        fn prop_accepted_within_limit(mime in accepted_mime(), size in 0u64..=MAX_FILE_BYTES) {
            prop_assert!(validate(mime, size).is_ok());
        }

        /// Property: accepted types over the limit always fail with FileTooLarge.
        #[test]
        fn prop_over_limit_rejected(mime in accepted_mime(), extra in 1u64..=1_000_000) {
            let result = validate(mime, MAX_FILE_BYTES + extra);
            let is_too_large = matches!(result, Err(ResizeError::FileTooLarge { .. }));
            prop_assert!(is_too_large);
        }

        /// Property: anything outside the accepted set fails with UnsupportedType.
        #[test]
        fn prop_other_types_rejected(mime in "[a-z]{1,10}/[a-z0-9.+-]{1,12}", size in 0u64..=MAX_FILE_BYTES) {
            prop_assume!(MediaType::from_mime(&mime).is_none());
            let is_unsupported = matches!(validate(&mime, size), Err(ResizeError::UnsupportedType(_)));
            prop_assert!(is_unsupported);
        }
    }
}
