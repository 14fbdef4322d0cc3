//! Procedural overlay generation and source-over compositing.
//!
//! Overlays are rasterized directly against the final buffer, never stored:
//! each output pixel evaluates the overlay color and alpha at its own
//! coordinates and blends `out = overlay * alpha + base * (1 - alpha)` per
//! channel. The base alpha accumulates source-over
//! (`a_out = a_overlay + a_base * (1 - a_overlay)`).
//!
//! The pattern tile grid is anchored at the buffer's top-left corner, so the
//! phase is deterministic and depends only on the final output dimensions.

use crate::buffer::PixelBuffer;
use crate::{Overlay, Rgba};

/// Composite an overlay onto a buffer, returning a new buffer.
///
/// `Overlay::None` is the identity.
pub fn composite(buffer: &PixelBuffer, overlay: &Overlay) -> PixelBuffer {
    match *overlay {
        Overlay::None => buffer.clone(),
        Overlay::Gradient {
            start,
            end,
            angle_degrees,
        } => composite_gradient(buffer, start, end, angle_degrees),
        Overlay::Pattern {
            dot_radius,
            spacing,
            color,
            opacity,
        } => composite_pattern(buffer, dot_radius, spacing, color, opacity),
    }
}

/// Rasterize a linear gradient across the full buffer and blend it over.
///
/// Every pixel center is projected onto the gradient axis; the projection is
/// normalized against the buffer corners so the gradient always spans the
/// whole image regardless of angle.
fn composite_gradient(buffer: &PixelBuffer, start: Rgba, end: Rgba, angle_degrees: f32) -> PixelBuffer {
    let angle_rad = (angle_degrees as f64).to_radians();
    let dir_x = angle_rad.cos();
    let dir_y = angle_rad.sin();

    // Projection range over the four corners normalizes t to [0, 1]
    let w = buffer.width as f64;
    let h = buffer.height as f64;
    let corners = [
        0.0,
        w * dir_x,
        h * dir_y,
        w * dir_x + h * dir_y,
    ];
    let p_min = corners.iter().cloned().fold(f64::INFINITY, f64::min);
    let p_max = corners.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = (p_max - p_min).max(f64::EPSILON);

    let start = start.to_array();
    let end = end.to_array();

    let mut output = Vec::with_capacity(buffer.pixels.len());
    for y in 0..buffer.height {
        for x in 0..buffer.width {
            let proj = (x as f64 + 0.5) * dir_x + (y as f64 + 0.5) * dir_y;
            let t = ((proj - p_min) / span).clamp(0.0, 1.0);

            let over = [
                lerp_u8(start[0], end[0], t),
                lerp_u8(start[1], end[1], t),
                lerp_u8(start[2], end[2], t),
                lerp_u8(start[3], end[3], t),
            ];
            let alpha = over[3] / 255.0;

            let base = buffer.pixel(x, y);
            output.extend_from_slice(&blend_source_over(base, over, alpha));
        }
    }

    PixelBuffer::new(buffer.width, buffer.height, output)
}

/// Tile a repeating dot motif over the buffer and blend it at `opacity`.
///
/// Dots sit at the center of `spacing x spacing` cells, with the grid
/// anchored at the top-left corner. Dot edges get a one-pixel smoothstep
/// falloff so they stay round at any radius.
fn composite_pattern(
    buffer: &PixelBuffer,
    dot_radius: f32,
    spacing: f32,
    color: Rgba,
    opacity: f32,
) -> PixelBuffer {
    let spacing = spacing as f64;
    let radius = dot_radius as f64;
    let opacity = opacity as f64;
    if spacing <= 0.0 || radius <= 0.0 || opacity <= 0.0 {
        return buffer.clone();
    }

    let color_arr = color.to_array();
    let over = [
        color_arr[0] as f64,
        color_arr[1] as f64,
        color_arr[2] as f64,
        color_arr[3] as f64,
    ];
    let color_alpha = over[3] / 255.0;

    let mut output = Vec::with_capacity(buffer.pixels.len());
    for y in 0..buffer.height {
        // Distance from this row to the nearest cell-center row
        let ly = (y as f64 + 0.5).rem_euclid(spacing) - spacing / 2.0;
        for x in 0..buffer.width {
            let lx = (x as f64 + 0.5).rem_euclid(spacing) - spacing / 2.0;
            let dist = (lx * lx + ly * ly).sqrt();

            let coverage = dot_coverage(dist, radius);
            let alpha = opacity * color_alpha * coverage;

            let base = buffer.pixel(x, y);
            output.extend_from_slice(&blend_source_over(base, over, alpha));
        }
    }

    PixelBuffer::new(buffer.width, buffer.height, output)
}

/// Dot coverage with a one-pixel anti-aliased rim.
///
/// Returns 1 inside the dot, 0 outside, smoothstepped across the final
/// pixel of radius.
#[inline]
fn dot_coverage(dist: f64, radius: f64) -> f64 {
    let inner = (radius - 0.5).max(0.0);
    let outer = radius + 0.5;
    if dist <= inner {
        return 1.0;
    }
    if dist >= outer {
        return 0.0;
    }
    let t = (dist - inner) / (outer - inner);
    1.0 - t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp_u8(a: u8, b: u8, t: f64) -> f64 {
    a as f64 + (b as f64 - a as f64) * t
}

/// Source-over blend of one pixel: RGB per the compositing equation, alpha
/// accumulated source-over.
#[inline]
fn blend_source_over(base: [u8; 4], over: [f64; 4], alpha: f64) -> [u8; 4] {
    let inv = 1.0 - alpha;
    let base_a = base[3] as f64 / 255.0;
    let out_a = alpha + base_a * inv;
    [
        (over[0] * alpha + base[0] as f64 * inv).clamp(0.0, 255.0).round() as u8,
        (over[1] * alpha + base[1] as f64 * inv).clamp(0.0, 255.0).round() as u8,
        (over[2] * alpha + base[2] as f64 * inv).clamp(0.0, 255.0).round() as u8,
        (out_a * 255.0).clamp(0.0, 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, [255, 255, 255, 255])
    }

    #[test]
    fn test_none_is_identity() {
        let img = white(8, 8);
        let result = composite(&img, &Overlay::None);
        assert_eq!(result.width, img.width);
        assert_eq!(result.height, img.height);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_opaque_gradient_replaces_base() {
        let img = white(10, 1);
        let overlay = Overlay::Gradient {
            start: Rgba::new(0, 0, 0, 255),
            end: Rgba::new(200, 0, 0, 255),
            angle_degrees: 0.0,
        };
        let result = composite(&img, &overlay);

        // Fully opaque overlay: output is the gradient itself
        let first = result.pixel(0, 0);
        let last = result.pixel(9, 0);
        assert!(first[0] < 20, "left edge should be near start color");
        assert!(last[0] > 180, "right edge should be near end color");
        assert_eq!(first[3], 255);
    }

    #[test]
    fn test_transparent_gradient_is_invisible() {
        let img = white(6, 6);
        let overlay = Overlay::Gradient {
            start: Rgba::new(255, 0, 0, 0),
            end: Rgba::new(0, 0, 255, 0),
            angle_degrees: 45.0,
        };
        let result = composite(&img, &overlay);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_half_alpha_gradient_blends() {
        let img = PixelBuffer::filled(1, 1, [0, 0, 0, 255]);
        let overlay = Overlay::Gradient {
            start: Rgba::new(255, 255, 255, 128),
            end: Rgba::new(255, 255, 255, 128),
            angle_degrees: 0.0,
        };
        let result = composite(&img, &overlay);

        // out = 255 * (128/255) + 0 * (1 - 128/255) = 128
        let p = result.pixel(0, 0);
        assert_eq!(p[0], 128);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_gradient_vertical_angle() {
        let img = white(1, 10);
        let overlay = Overlay::Gradient {
            start: Rgba::new(0, 0, 0, 255),
            end: Rgba::new(0, 200, 0, 255),
            angle_degrees: 90.0,
        };
        let result = composite(&img, &overlay);

        assert!(result.pixel(0, 0)[1] < 20);
        assert!(result.pixel(0, 9)[1] > 180);
    }

    #[test]
    fn test_gradient_angle_reverses_direction() {
        let img = white(10, 1);
        let forward = composite(
            &img,
            &Overlay::Gradient {
                start: Rgba::new(0, 0, 0, 255),
                end: Rgba::new(200, 200, 200, 255),
                angle_degrees: 0.0,
            },
        );
        let reverse = composite(
            &img,
            &Overlay::Gradient {
                start: Rgba::new(0, 0, 0, 255),
                end: Rgba::new(200, 200, 200, 255),
                angle_degrees: 180.0,
            },
        );

        // At 180 degrees the start color sits on the right edge instead
        assert_eq!(forward.pixel(0, 0)[0], reverse.pixel(9, 0)[0]);
        assert_eq!(forward.pixel(9, 0)[0], reverse.pixel(0, 0)[0]);
    }

    #[test]
    fn test_pattern_dot_lands_at_cell_center() {
        let img = white(8, 8);
        let overlay = Overlay::Pattern {
            dot_radius: 2.0,
            spacing: 8.0,
            color: Rgba::new(0, 0, 0, 255),
            opacity: 1.0,
        };
        let result = composite(&img, &overlay);

        // Cell center (4, 4) is inside the dot; the corner is not
        assert!(result.pixel(4, 4)[0] < 10);
        assert_eq!(result.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_pattern_phase_is_deterministic() {
        let overlay = Overlay::Pattern {
            dot_radius: 1.5,
            spacing: 6.0,
            color: Rgba::new(20, 40, 60, 255),
            opacity: 0.8,
        };
        let a = composite(&white(12, 12), &overlay);
        let b = composite(&white(12, 12), &overlay);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_pattern_tiles_repeat() {
        let img = white(16, 16);
        let overlay = Overlay::Pattern {
            dot_radius: 2.0,
            spacing: 8.0,
            color: Rgba::new(0, 0, 0, 255),
            opacity: 1.0,
        };
        let result = composite(&img, &overlay);

        // The motif repeats with the spacing period
        for y in 0..8u32 {
            for x in 0..8u32 {
                assert_eq!(
                    result.pixel(x, y),
                    result.pixel(x + 8, y + 8),
                    "tile mismatch at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_pattern_zero_opacity_is_identity() {
        let img = white(8, 8);
        let overlay = Overlay::Pattern {
            dot_radius: 2.0,
            spacing: 4.0,
            color: Rgba::new(0, 0, 0, 255),
            opacity: 0.0,
        };
        let result = composite(&img, &overlay);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_overlay_preserves_dimensions() {
        let img = white(13, 7);
        let overlay = Overlay::Gradient {
            start: Rgba::new(10, 20, 30, 200),
            end: Rgba::new(200, 100, 50, 40),
            angle_degrees: 200.0,
        };
        let result = composite(&img, &overlay);
        assert_eq!(result.width, 13);
        assert_eq!(result.height, 7);
    }

    #[test]
    fn test_overlay_over_transparent_base() {
        let img = PixelBuffer::filled(2, 2, [0, 0, 0, 0]);
        let overlay = Overlay::Gradient {
            start: Rgba::new(100, 100, 100, 255),
            end: Rgba::new(100, 100, 100, 255),
            angle_degrees: 0.0,
        };
        let result = composite(&img, &overlay);

        // Opaque overlay over transparent base is just the overlay
        assert_eq!(result.pixel(0, 0), [100, 100, 100, 255]);
    }
}
