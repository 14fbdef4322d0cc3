//! Pixforge WASM - WebAssembly bindings for Pixforge
//!
//! This crate exposes the pixforge-core editing pipeline to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG, JPEG upload bytes)
//! - `pipeline` - The edit render pipeline binding
//! - `encode` - Image encoding bindings (PNG/JPEG export)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, render_edit, encode_png } from '@pixforge/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const source = decode_image(bytes);
//! const output = render_edit(source, editState);
//! const png = encode_png(output);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod pipeline;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use pipeline::render_edit;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
