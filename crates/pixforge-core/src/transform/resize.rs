//! Bilinear resizing to exact target dimensions.
//!
//! Uses the same inverse-mapping bilinear sampler idea as rotation, with
//! edge taps clamped into the source (the whole source maps onto the output,
//! so there is no exposed area to fill with transparency). Aspect ratio is
//! not preserved; the output is always exactly the requested size.

use crate::buffer::PixelBuffer;
use crate::ResizeTarget;

/// Resample a buffer to exactly `target.width x target.height`.
///
/// The pipeline rejects zero-sized targets before calling this; over valid
/// input the operation is total.
pub fn apply_resize(buffer: &PixelBuffer, target: &ResizeTarget) -> PixelBuffer {
    // Fast path: dimensions already match
    if buffer.width == target.width && buffer.height == target.height {
        return buffer.clone();
    }

    let dst_w = target.width.max(1);
    let dst_h = target.height.max(1);

    let scale_x = buffer.width as f64 / dst_w as f64;
    let scale_y = buffer.height as f64 / dst_h as f64;

    let mut output = vec![0u8; (dst_w as usize) * (dst_h as usize) * 4];

    for dst_y in 0..dst_h {
        // Map the destination pixel center back into source coordinates
        let src_y = (dst_y as f64 + 0.5) * scale_y - 0.5;
        for dst_x in 0..dst_w {
            let src_x = (dst_x as f64 + 0.5) * scale_x - 0.5;

            let pixel = sample_bilinear_clamped(buffer, src_x, src_y);
            let dst_idx = ((dst_y * dst_w + dst_x) * 4) as usize;
            output[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
        }
    }

    PixelBuffer::new(dst_w, dst_h, output)
}

/// Read a pixel with coordinates clamped into the source bounds.
#[inline]
fn tap_clamped(buffer: &PixelBuffer, px: i64, py: i64) -> [f64; 4] {
    let x = px.clamp(0, buffer.width as i64 - 1) as usize;
    let y = py.clamp(0, buffer.height as i64 - 1) as usize;
    let idx = (y * buffer.width as usize + x) * 4;
    [
        buffer.pixels[idx] as f64,
        buffer.pixels[idx + 1] as f64,
        buffer.pixels[idx + 2] as f64,
        buffer.pixels[idx + 3] as f64,
    ]
}

/// Bilinear sample with edge clamping and alpha-weighted color channels.
fn sample_bilinear_clamped(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let taps = [
        (tap_clamped(buffer, x0, y0), (1.0 - fx) * (1.0 - fy)),
        (tap_clamped(buffer, x0 + 1, y0), fx * (1.0 - fy)),
        (tap_clamped(buffer, x0, y0 + 1), (1.0 - fx) * fy),
        (tap_clamped(buffer, x0 + 1, y0 + 1), fx * fy),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_resize_exact_dimensions() {
        let img = gradient_image(100, 50);
        let result = apply_resize(&img, &ResizeTarget::new(40, 30));

        assert_eq!(result.width, 40);
        assert_eq!(result.height, 30);
        assert_eq!(result.pixels.len(), 40 * 30 * 4);
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let img = gradient_image(32, 32);
        let result = apply_resize(&img, &ResizeTarget::new(32, 32));
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let img = gradient_image(100, 100);
        let result = apply_resize(&img, &ResizeTarget::new(10, 80));

        assert_eq!(result.width, 10);
        assert_eq!(result.height, 80);
    }

    #[test]
    fn test_upscale_dimensions() {
        let img = gradient_image(10, 10);
        let result = apply_resize(&img, &ResizeTarget::new(37, 23));

        assert_eq!(result.width, 37);
        assert_eq!(result.height, 23);
    }

    #[test]
    fn test_solid_color_survives_resize() {
        let img = PixelBuffer::filled(16, 16, [90, 60, 30, 255]);
        let result = apply_resize(&img, &ResizeTarget::new(7, 11));

        for y in 0..result.height {
            for x in 0..result.width {
                assert_eq!(result.pixel(x, y), [90, 60, 30, 255]);
            }
        }
    }

    #[test]
    fn test_downscale_two_to_one_averages() {
        // A 2x1 image of black and white halves downscales to mid-gray
        let img = PixelBuffer::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]);
        let result = apply_resize(&img, &ResizeTarget::new(1, 1));

        let p = result.pixel(0, 0);
        assert_eq!(p[3], 255);
        assert!((p[0] as i32 - 128).abs() <= 1, "got {}", p[0]);
    }

    #[test]
    fn test_transparent_image_stays_transparent() {
        let img = PixelBuffer::filled(8, 8, [0, 0, 0, 0]);
        let result = apply_resize(&img, &ResizeTarget::new(4, 4));

        for y in 0..result.height {
            for x in 0..result.width {
                assert_eq!(result.pixel(x, y)[3], 0);
            }
        }
    }

    #[test]
    fn test_resize_from_1x1() {
        let img = PixelBuffer::new(1, 1, vec![10, 20, 30, 255]);
        let result = apply_resize(&img, &ResizeTarget::new(5, 5));

        assert_eq!(result.width, 5);
        assert_eq!(result.height, 5);
        assert_eq!(result.pixel(2, 2), [10, 20, 30, 255]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
