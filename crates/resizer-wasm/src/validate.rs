//! Upload validation bindings.
//!
//! Lets the page reject a file before reading its bytes.
//!
//! ```typescript
//! import { validate_file } from '@resizer/wasm';
//!
//! try {
//!   const mime = validate_file(file.type, file.size);
//! } catch (message) {
//!   showError(message);
//! }
//! ```

use resizer_core::validate;
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// Check a file's declared MIME type and size.
///
/// Returns the canonical MIME type (`image/jpg` becomes `image/jpeg`), or
/// throws the user-facing message.
#[wasm_bindgen]
pub fn validate_file(mime: &str, size: f64) -> Result<String, JsValue> {
    check(mime, size).map_err(to_js_error)
}

fn check(mime: &str, size: f64) -> Result<String, resizer_core::ResizeError> {
    // JS numbers: negative or NaN sizes count as empty
    let size = if size.is_finite() { size.max(0.0) as u64 } else { 0 };
    validate::validate(mime, size).map(|media| media.mime().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resizer_core::ResizeError;

    #[test]
    fn test_check_accepts_images() {
        assert_eq!(check("image/png", 1024.0).unwrap(), "image/png");
        assert_eq!(check("image/jpg", 1024.0).unwrap(), "image/jpeg");
        assert_eq!(check("image/webp", 10_485_760.0).unwrap(), "image/webp");
    }

    #[test]
    fn test_check_rejects() {
        assert!(matches!(
            check("application/pdf", 10.0),
            Err(ResizeError::UnsupportedType(_))
        ));
        assert!(matches!(
            check("image/gif", 10_485_761.0),
            Err(ResizeError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_check_odd_sizes() {
        assert!(check("image/gif", -5.0).is_ok());
        assert!(check("image/gif", f64::NAN).is_ok());
    }
}
