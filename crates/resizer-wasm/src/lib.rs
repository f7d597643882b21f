//! Resizer WASM - WebAssembly bindings for the image resizer
//!
//! This crate exposes resizer-core to the hosting web page.
//!
//! # Module Structure
//!
//! - `session` - `JsResizeSession`, the select / configure / resize / download workflow
//! - `presets` - Social media preset catalog
//! - `validate` - Upload checks before reading file bytes
//! - `logger` - Routes engine logs to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsResizeSession, set_log_level } from '@resizer/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const session = new JsResizeSession({ max_dimension: 4000 });
//! ```

use resizer_core::ResizeError;
use wasm_bindgen::prelude::*;

mod logger;
mod presets;
mod session;
mod validate;

pub use presets::{list_platforms, list_presets};
pub use session::{JsDownload, JsRenderJob, JsResizeSession};
pub use validate::validate_file;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(logger::DEFAULT_LEVEL);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {level}")))?;
    log::set_max_level(filter);
    Ok(())
}

/// Errors cross into JavaScript as the user-facing message.
pub(crate) fn to_js_error(err: ResizeError) -> JsValue {
    JsValue::from_str(&err.user_message())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_is_repeatable() {
        init();
        init();
        log::info!("console logger ready");
    }

    #[wasm_bindgen_test]
    fn test_unknown_log_level() {
        let err = set_log_level("loud").unwrap_err();
        assert_eq!(err.as_string().unwrap(), "Unknown log level: loud");
    }
}
