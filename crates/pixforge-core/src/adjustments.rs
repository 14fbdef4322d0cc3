//! Color adjustment and filter algorithms.
//!
//! Applies the slider adjustments and the named filter to RGBA pixel data.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Hue rotation
//! 5. Named filter (blended by intensity)
//!
//! Every step clamps its result to [0, 255] so overflow artifacts cannot
//! compound across steps. Alpha is never touched.

use crate::buffer::PixelBuffer;
use crate::{ColorAdjustment, FilterSelection, ImageFilter};

/// Rec.601 luma coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;
/// Rec.601 luma coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;
/// Rec.601 luma coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Apply the adjustments and filter to a buffer, returning a new buffer.
///
/// Channel math runs in f32 over the 0-255 range. With identity adjustments
/// and filter intensity 0 the output is bit-for-bit identical to the input:
/// each step guards on its identity value and passes the channels through
/// untouched.
pub fn apply_adjustments(
    buffer: &PixelBuffer,
    adjustment: &ColorAdjustment,
    filter: &FilterSelection,
) -> PixelBuffer {
    // Early exit if nothing can change
    if adjustment.is_identity() && filter.is_identity() {
        return buffer.clone();
    }

    let mut output = Vec::with_capacity(buffer.pixels.len());

    for chunk in buffer.pixels.chunks_exact(4) {
        let mut r = chunk[0] as f32;
        let mut g = chunk[1] as f32;
        let mut b = chunk[2] as f32;

        // Apply adjustments in order
        (r, g, b) = apply_brightness(r, g, b, adjustment.brightness);
        (r, g, b) = apply_contrast(r, g, b, adjustment.contrast);
        (r, g, b) = apply_saturation(r, g, b, adjustment.saturation);
        (r, g, b) = apply_hue_rotation(r, g, b, adjustment.hue_degrees);
        (r, g, b) = apply_filter(r, g, b, filter);

        output.push(r.round() as u8);
        output.push(g.round() as u8);
        output.push(b.round() as u8);
        output.push(chunk[3]);
    }

    PixelBuffer::new(buffer.width, buffer.height, output)
}

/// Calculate luma using Rec.601 coefficients (0-255 domain).
#[inline]
fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

#[inline]
fn clamp255(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Apply brightness adjustment.
///
/// Brightness is a percentage where 100 is the identity.
///
/// Formula: `output = input * brightness / 100`
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, brightness: f32) -> (f32, f32, f32) {
    if brightness == 100.0 {
        return (r, g, b);
    }
    let factor = brightness / 100.0;
    (
        clamp255(r * factor),
        clamp255(g * factor),
        clamp255(b * factor),
    )
}

/// Apply contrast adjustment around the 128 midpoint.
///
/// Formula: `output = 128 + (input - 128) * contrast / 100`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 100.0 {
        return (r, g, b);
    }
    let factor = contrast / 100.0;
    let midpoint = 128.0;
    (
        clamp255((r - midpoint) * factor + midpoint),
        clamp255((g - midpoint) * factor + midpoint),
        clamp255((b - midpoint) * factor + midpoint),
    )
}

/// Apply saturation adjustment.
///
/// Blends each channel between the pixel's luma (0%) and beyond its
/// original chroma (up to 200%).
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 100.0 {
        return (r, g, b);
    }
    let gray = luma(r, g, b);
    let factor = saturation / 100.0;
    (
        clamp255(gray + (r - gray) * factor),
        clamp255(gray + (g - gray) * factor),
        clamp255(gray + (b - gray) * factor),
    )
}

/// Rotate the hue by the given angle, leaving saturation and lightness
/// unchanged.
///
/// Converts through HSL: RGB -> HSL, shift H, HSL -> RGB.
#[inline]
fn apply_hue_rotation(r: f32, g: f32, b: f32, hue_degrees: f32) -> (f32, f32, f32) {
    if hue_degrees == 0.0 {
        return (r, g, b);
    }
    let (h, s, l) = rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0);
    let shifted = (h + hue_degrees.rem_euclid(360.0) / 360.0).fract();
    let (nr, ng, nb) = hsl_to_rgb(shifted, s, l);
    (
        clamp255(nr * 255.0),
        clamp255(ng * 255.0),
        clamp255(nb * 255.0),
    )
}

/// Blend the named filter over the adjusted channels.
///
/// The result is a linear interpolation between the unfiltered input
/// (intensity 0) and the fully applied filter (intensity 100), so intensity
/// 0 returns the input channels unchanged.
#[inline]
fn apply_filter(r: f32, g: f32, b: f32, selection: &FilterSelection) -> (f32, f32, f32) {
    let t = selection.intensity / 100.0;
    if t <= 0.0 {
        return (r, g, b);
    }

    let (fr, fg, fb) = match selection.filter {
        ImageFilter::None => return (r, g, b),
        ImageFilter::Grayscale => grayscale_target(r, g, b),
        ImageFilter::Sepia => sepia_target(r, g, b),
        ImageFilter::Vintage => vintage_target(r, g, b),
    };

    (
        clamp255(lerp(r, fr, t)),
        clamp255(lerp(g, fg, t)),
        clamp255(lerp(b, fb, t)),
    )
}

/// Fully applied grayscale: every channel becomes the pixel's luma.
#[inline]
fn grayscale_target(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = luma(r, g, b);
    (l, l, l)
}

/// Fully applied sepia using the classic matrix.
#[inline]
fn sepia_target(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        clamp255(0.393 * r + 0.769 * g + 0.189 * b),
        clamp255(0.349 * r + 0.686 * g + 0.168 * b),
        clamp255(0.272 * r + 0.534 * g + 0.131 * b),
    )
}

/// Fully applied vintage: a fixed recipe of brightness 110, contrast 110,
/// saturation 130, then sepia at half weight.
#[inline]
fn vintage_target(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (r, g, b) = apply_brightness(r, g, b, 110.0);
    let (r, g, b) = apply_contrast(r, g, b, 110.0);
    let (r, g, b) = apply_saturation(r, g, b, 130.0);
    let (sr, sg, sb) = sepia_target(r, g, b);
    (lerp(r, sr, 0.5), lerp(g, sg, 0.5), lerp(b, sb, 0.5))
}

/// RGB (0..1) -> HSL (H: 0..1, S: 0..1, L: 0..1)
fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < 1e-6 {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < 1e-6 {
        let mut h = (g - b) / d;
        if h < 0.0 {
            h += 6.0;
        }
        h / 6.0
    } else if (max - g).abs() < 1e-6 {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    (h, s, l)
}

/// HSL (H: 0..1, S: 0..1, L: 0..1) -> RGB (0..1)
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s.abs() < 1e-6 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (r, g, b)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}
