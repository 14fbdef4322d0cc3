//! Lossy JPEG export.
//!
//! JPEG has no alpha plane, so the buffer is composited against opaque white
//! before encoding. This is a deliberate, documented lossy conversion, not
//! an oversight.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{validate_buffer, EncodeError};
use crate::buffer::PixelBuffer;

/// Encode an RGBA buffer to JPEG bytes.
///
/// # Arguments
///
/// * `buffer` - The buffer to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
///
/// # Errors
///
/// Quality outside 1-100 is rejected with [`EncodeError::InvalidQuality`]
/// rather than clamped; unlike the slider parameters there is no UI bound
/// backing it, and silently changing an export setting would surprise the
/// caller. Dimension and pixel-length mismatches error like PNG encoding.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(buffer)?;

    if quality == 0 || quality > 100 {
        return Err(EncodeError::InvalidQuality(quality));
    }

    let rgb = flatten_onto_white(buffer);

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);

    encoder
        .write_image(&rgb, buffer.width, buffer.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

/// Composite straight-alpha RGBA against an opaque white background,
/// producing tightly packed RGB.
fn flatten_onto_white(buffer: &PixelBuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((buffer.width as usize) * (buffer.height as usize) * 3);

    for chunk in buffer.pixels.chunks_exact(4) {
        let a = chunk[3] as u32;
        if a == 255 {
            rgb.extend_from_slice(&chunk[0..3]);
            continue;
        }
        let inv = 255 - a;
        // out = c * a/255 + 255 * (1 - a/255), in integer math
        rgb.push(((chunk[0] as u32 * a + 255 * inv + 127) / 255) as u8);
        rgb.push(((chunk[1] as u32 * a + 255 * inv + 127) / 255) as u8);
        rgb.push(((chunk[2] as u32 * a + 255 * inv + 127) / 255) as u8);
    }

    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
