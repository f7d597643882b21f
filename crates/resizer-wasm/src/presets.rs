//! Preset catalog bindings.
//!
//! ```typescript
//! import { list_platforms, list_presets } from '@resizer/wasm';
//!
//! for (const platform of list_platforms()) {
//!   for (const { label, width, height } of list_presets(platform)) {
//!     addOption(platform, label, width, height);
//!   }
//! }
//! ```

use resizer_core::presets::{self, Platform, PresetEntry};
use resizer_core::ResizeError;
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// Platform names in display order.
#[wasm_bindgen]
pub fn list_platforms() -> js_sys::Array {
    presets::list_platforms()
        .map(|platform| JsValue::from_str(platform.name()))
        .collect()
}

/// Presets for one platform as `{ platform, label, width, height }` objects.
#[wasm_bindgen]
pub fn list_presets(platform: &str) -> Result<JsValue, JsValue> {
    let entries = presets_for(platform).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(entries).map_err(JsValue::from)
}

fn presets_for(platform: &str) -> Result<&'static [PresetEntry], ResizeError> {
    let platform = Platform::from_name(platform).ok_or_else(|| ResizeError::PresetNotFound {
        platform: platform.to_string(),
        preset: String::new(),
    })?;
    Ok(presets::list_presets(platform))
}
