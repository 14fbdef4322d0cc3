//! Sub-rectangle extraction.
//!
//! Cropping copies pixels verbatim; there is no resampling, so a cropped
//! pixel is always bit-identical to its source pixel.

use crate::buffer::PixelBuffer;
use crate::CropRect;

/// Extract the sub-rectangle described by `rect`.
///
/// The rectangle is intersected with the buffer bounds before copying; the
/// pipeline rejects rectangles whose intersection is empty before calling
/// this, so the output here is always at least 1x1.
///
/// # Arguments
///
/// * `buffer` - Source buffer
/// * `rect` - Crop region in source pixel coordinates
///
/// # Returns
///
/// A new `PixelBuffer` containing only the cropped region.
pub fn apply_crop(buffer: &PixelBuffer, rect: &CropRect) -> PixelBuffer {
    // Fast path: full-frame crop returns a clone
    if rect.x <= 0
        && rect.y <= 0
        && rect.x as i64 + rect.width as i64 >= buffer.width as i64
        && rect.y as i64 + rect.height as i64 >= buffer.height as i64
    {
        return buffer.clone();
    }

    let clamped = rect
        .clamp_to(buffer.width, buffer.height)
        .unwrap_or(CropRect {
            x: rect.x.clamp(0, buffer.width.saturating_sub(1) as i32),
            y: rect.y.clamp(0, buffer.height.saturating_sub(1) as i32),
            width: 1,
            height: 1,
        });

    let left = clamped.x as u32;
    let top = clamped.y as u32;
    let out_width = clamped.width.min(buffer.width - left).max(1);
    let out_height = clamped.height.min(buffer.height - top).max(1);

    let row_bytes = (out_width * 4) as usize;
    let mut output = vec![0u8; (out_width * out_height * 4) as usize];

    // Copy whole rows; crop never resamples
    for y in 0..out_height {
        let src_start = (((top + y) * buffer.width + left) * 4) as usize;
        let dst_start = (y as usize) * row_bytes;
        output[dst_start..dst_start + row_bytes]
            .copy_from_slice(&buffer.pixels[src_start..src_start + row_bytes]);
    }

    PixelBuffer::new(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
