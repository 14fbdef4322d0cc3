//! Image encoding WASM bindings.
//!
//! Exposes the export encoders so the UI can turn the rendered buffer into
//! downloadable bytes.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@pixforge/wasm';
//!
//! const pngBytes = encode_png(rendered);
//! const jpegBytes = encode_jpeg(rendered, 90);
//!
//! const blob = new Blob([pngBytes], { type: 'image/png' });
//! ```

use crate::types::JsPixelBuffer;
use pixforge_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a pixel buffer to lossless PNG bytes.
///
/// # Errors
///
/// Returns an error if the buffer has zero dimensions or inconsistent pixel
/// data.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_buffer()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a pixel buffer to JPEG bytes.
///
/// Alpha is composited against opaque white: JPEG has no alpha plane, so
/// this conversion is lossy by design.
///
/// # Arguments
///
/// * `image` - The buffer to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality, recommended: 90)
///
/// # Errors
///
/// Returns an error for quality outside 1-100, zero dimensions, or
/// inconsistent pixel data.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_buffer(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// These tests can only run on wasm32 targets. Use `wasm-pack test` to run
/// them.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let img = JsPixelBuffer::new(8, 8, vec![200u8; 8 * 8 * 4]);
        let result = encode_png(&img);
        assert!(result.is_ok());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_quality() {
        let img = JsPixelBuffer::new(8, 8, vec![200u8; 8 * 8 * 4]);
        let result = encode_jpeg(&img, 0);
        assert!(result.is_err());
    }
}
