//! Render pipeline WASM bindings.
//!
//! The UI keeps a plain-object `EditState`, mutates a working copy on every
//! control change, and resubmits the whole value here. The render always
//! starts from the original source buffer, so repeated edits never
//! accumulate resampling or rounding drift.

use crate::types::JsPixelBuffer;
use pixforge_core::{render, EditState};
use wasm_bindgen::prelude::*;

/// Render an edit state against a source buffer.
///
/// # Arguments
///
/// * `source` - The decoded source buffer (never mutated)
/// * `state` - A plain JS object matching the `EditState` shape
///
/// # Errors
///
/// Returns an error when the state cannot be deserialized, when the crop
/// rectangle misses the image entirely, or when the resize target has a
/// zero dimension. Out-of-range slider values are clamped, not rejected.
///
/// # Example
///
/// ```typescript
/// const output = render_edit(source, {
///   crop: { x: 10, y: 10, width: 400, height: 300 },
///   adjustment: { brightness: 110, contrast: 100, saturation: 120, hue_degrees: 0 },
///   filter: { filter: 'Sepia', intensity: 60 },
///   rotation_degrees: 90,
///   resize: { width: 800, height: 600 },
///   overlay: 'None',
/// });
/// ```
#[wasm_bindgen]
pub fn render_edit(source: &JsPixelBuffer, state: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let state: EditState = serde_wasm_bindgen::from_value(state)
        .map_err(|e| JsValue::from_str(&format!("invalid edit state: {}", e)))?;

    let buffer = source.to_buffer();
    match render(&buffer, &state) {
        Ok(output) => Ok(JsPixelBuffer::from_buffer(output)),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}
