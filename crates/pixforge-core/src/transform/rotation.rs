//! Rotation about the buffer center with bilinear interpolation.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixels contribute to it and interpolate their
//! values. Coordinates are pixel centers, so for rotation by angle θ the
//! inverse transform is:
//! ```text
//! src_x = (dst_x + 0.5 - dst_cx) * cos(-θ) - (dst_y + 0.5 - dst_cy) * sin(-θ) + src_cx - 0.5
//! src_y = (dst_x + 0.5 - dst_cx) * sin(-θ) + (dst_y + 0.5 - dst_cy) * cos(-θ) + src_cy - 0.5
//! ```
//!
//! The output canvas is expanded to the rotated bounding box; area not
//! covered by the source is fully transparent, and samples straddling the
//! source edge are alpha-weighted so the border anti-aliases toward
//! transparency instead of toward black.

use crate::buffer::PixelBuffer;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated by an angle that is not a multiple of 90
/// degrees, the corners extend beyond the original bounds. This returns the
/// minimum box that contains the entire rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f32) -> (u32, u32) {
    // Normalize so 360, 720, -90 etc. hit the fast paths
    let angle_normalized = (angle_degrees as f64).rem_euclid(360.0);

    // Fast path: no rotation (including near-zero and full turns)
    if angle_normalized < 0.001 || angle_normalized > 359.999 {
        return (width, height);
    }

    // Fast path: exact quarter turns
    if (angle_normalized - 90.0).abs() < 0.001 || (angle_normalized - 270.0).abs() < 0.001 {
        return (height, width);
    }
    if (angle_normalized - 180.0).abs() < 0.001 {
        return (width, height);
    }

    let angle_rad = angle_normalized.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate a buffer about its center.
///
/// The output canvas is expanded to fit the entire rotated image; newly
/// exposed area is fully transparent.
///
/// # Arguments
///
/// * `buffer` - Source buffer
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
pub fn apply_rotation(buffer: &PixelBuffer, angle_degrees: f32) -> PixelBuffer {
    let normalized = (angle_degrees as f64).rem_euclid(360.0);

    // Fast path: no rotation needed
    if normalized < 0.001 || normalized > 359.999 {
        return buffer.clone();
    }

    let (src_w, src_h) = (buffer.width as f64, buffer.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(buffer.width, buffer.height, angle_degrees);

    // Negate the angle so a positive value rotates counter-clockwise visually
    let angle_rad = -normalized.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w as usize) * (dst_h as usize) * 4];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel-center offsets relative to the destination center
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Inverse rotation back into source coordinates
            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let pixel = sample_bilinear(buffer, src_x, src_y);

            let dst_idx = ((dst_y * dst_w + dst_x) * 4) as usize;
            output[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
        }
    }

    PixelBuffer::new(dst_w, dst_h, output)
}

/// Get a pixel as [f64; 4], treating out-of-bounds coordinates as fully
/// transparent.
#[inline]
fn tap(buffer: &PixelBuffer, px: i64, py: i64) -> [f64; 4] {
    if px < 0 || py < 0 || px >= buffer.width as i64 || py >= buffer.height as i64 {
        return [0.0, 0.0, 0.0, 0.0];
    }
    let idx = ((py as usize) * (buffer.width as usize) + px as usize) * 4;
    [
        buffer.pixels[idx] as f64,
        buffer.pixels[idx + 1] as f64,
        buffer.pixels[idx + 2] as f64,
        buffer.pixels[idx + 3] as f64,
    ]
}

/// Sample an RGBA pixel with bilinear interpolation.
///
/// The four neighbor taps are weighted by distance; color channels are
/// additionally weighted by alpha so a tap outside the source (transparent)
/// contributes no color, only reduced coverage.
fn sample_bilinear(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    // Entirely outside the source: transparent
    if x < -1.0 || y < -1.0 || x > buffer.width as f64 || y > buffer.height as f64 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let taps = [
        (tap(buffer, x0, y0), (1.0 - fx) * (1.0 - fy)),
        (tap(buffer, x0 + 1, y0), fx * (1.0 - fy)),
        (tap(buffer, x0, y0 + 1), (1.0 - fx) * fy),
        (tap(buffer, x0 + 1, y0 + 1), fx * fy),
    ];

    let mut rgb = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (pixel, weight) in taps {
        let coverage = pixel[3] * weight;
        rgb[0] += pixel[0] * coverage;
        rgb[1] += pixel[1] * coverage;
        rgb[2] += pixel[2] * coverage;
        alpha += coverage;
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    [
        (rgb[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (rgb[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (rgb[2] / alpha).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}
