//! Image decoding WASM bindings.
//!
//! The browser side hands over the raw bytes of an uploaded or fetched file;
//! decoding failures come back as JS errors so the UI can report them
//! instead of showing a placeholder.

use crate::types::JsPixelBuffer;
use pixforge_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image file (PNG, JPEG) into an RGBA pixel buffer.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as a `Uint8Array`
///
/// # Errors
///
/// Returns an error when the bytes are empty, the format is unrecognized,
/// or the file is corrupted.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
