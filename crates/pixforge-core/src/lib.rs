//! Pixforge Core - Image editing pipeline
//!
//! This crate provides the core image editing functionality for Pixforge:
//! a deterministic render pipeline over RGBA pixel buffers (crop, color
//! adjustments, named filters, rotation, resize, overlay compositing) plus
//! PNG/JPEG export encoding.

use serde::{Deserialize, Serialize};

pub mod adjustments;
pub mod buffer;
pub mod decode;
pub mod encode;
pub mod overlay;
pub mod pipeline;
pub mod transform;

pub use adjustments::apply_adjustments;
pub use buffer::PixelBuffer;
pub use decode::{decode, DecodeError};
pub use encode::{encode, encode_jpeg, encode_png, EncodeError};
pub use overlay::composite;
pub use pipeline::{render, PipelineError};
pub use transform::{apply_crop, apply_resize, apply_rotation, compute_rotated_bounds};

/// An RGBA color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color as a `[r, g, b, a]` byte array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Crop region in source-buffer pixel coordinates.
///
/// The origin may lie outside the buffer; the pipeline clamps the rectangle
/// to the buffer bounds before use and rejects rectangles that end up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge in pixels (may be negative before clamping).
    pub x: i32,
    /// Top edge in pixels (may be negative before clamping).
    pub y: i32,
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect the rectangle with a `bounds_width x bounds_height` image.
    ///
    /// Returns `None` when the intersection is empty (zero-area request or a
    /// rectangle lying entirely outside the image).
    pub fn clamp_to(&self, bounds_width: u32, bounds_height: u32) -> Option<CropRect> {
        let x0 = (self.x as i64).clamp(0, bounds_width as i64);
        let y0 = (self.y as i64).clamp(0, bounds_height as i64);
        let x1 = (self.x as i64 + self.width as i64).clamp(0, bounds_width as i64);
        let y1 = (self.y as i64 + self.height as i64).clamp(0, bounds_height as i64);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(CropRect {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Slider-style color adjustments.
///
/// Brightness, contrast, and saturation are percentages where 100 is the
/// identity; the valid range is 0 to 200. Hue rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorAdjustment {
    /// Brightness percentage (0 to 200, 100 = unchanged).
    pub brightness: f32,
    /// Contrast percentage (0 to 200, 100 = unchanged).
    pub contrast: f32,
    /// Saturation percentage (0 to 200, 100 = unchanged).
    pub saturation: f32,
    /// Hue rotation in degrees (0 to 360).
    pub hue_degrees: f32,
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue_degrees: 0.0,
        }
    }
}

impl ColorAdjustment {
    /// Create a new ColorAdjustment with identity values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their identity defaults.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Clamp all values into their valid ranges.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: self.brightness.clamp(0.0, 200.0),
            contrast: self.contrast.clamp(0.0, 200.0),
            saturation: self.saturation.clamp(0.0, 200.0),
            hue_degrees: self.hue_degrees.rem_euclid(360.0),
        }
    }
}

/// Named filter applied after the basic color adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFilter {
    /// No filter.
    #[default]
    None,
    /// Replace RGB with luma.
    Grayscale,
    /// Classic sepia matrix.
    Sepia,
    /// Warm faded-photo recipe (brightness, contrast, saturation boost plus
    /// half-strength sepia).
    Vintage,
}

/// A named filter together with its blend intensity.
///
/// Intensity 0 leaves the image untouched; 100 applies the filter fully.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub filter: ImageFilter,
    /// Blend strength (0 to 100).
    pub intensity: f32,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            filter: ImageFilter::None,
            intensity: 100.0,
        }
    }
}

impl FilterSelection {
    pub fn new(filter: ImageFilter, intensity: f32) -> Self {
        Self { filter, intensity }
    }

    /// True when applying the selection cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.filter == ImageFilter::None || self.intensity <= 0.0
    }

    /// Clamp the intensity into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            filter: self.filter,
            intensity: self.intensity.clamp(0.0, 100.0),
        }
    }
}

/// Exact output dimensions for the resize stage.
///
/// Aspect ratio is not auto-preserved; callers wanting letterboxing adjust
/// the target themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
}

impl ResizeTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Procedural overlay composited as the final pipeline stage.
///
/// Overlays are defined in final-output pixel space: the gradient angle and
/// the pattern phase are what the viewer sees, independent of any earlier
/// crop, rotation, or resize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Overlay {
    /// No overlay.
    #[default]
    None,
    /// Linear gradient between two colors along an angle, covering the
    /// whole buffer.
    Gradient {
        start: Rgba,
        end: Rgba,
        /// Gradient axis in degrees (0 = left-to-right).
        angle_degrees: f32,
    },
    /// Repeating dot motif anchored at the top-left corner.
    Pattern {
        /// Dot radius in pixels.
        dot_radius: f32,
        /// Tile edge length in pixels.
        spacing: f32,
        color: Rgba,
        /// Overlay opacity (0.0 to 1.0).
        opacity: f32,
    },
}

impl Overlay {
    /// Clamp numeric parameters into their valid ranges.
    pub fn clamped(&self) -> Self {
        match *self {
            Overlay::None => Overlay::None,
            Overlay::Gradient {
                start,
                end,
                angle_degrees,
            } => Overlay::Gradient {
                start,
                end,
                angle_degrees: angle_degrees.rem_euclid(360.0),
            },
            Overlay::Pattern {
                dot_radius,
                spacing,
                color,
                opacity,
            } => Overlay::Pattern {
                dot_radius: dot_radius.max(0.0),
                spacing: spacing.max(1.0),
                color,
                opacity: opacity.clamp(0.0, 1.0),
            },
        }
    }
}

/// Target encoding for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Lossless RGBA.
    Png,
    /// Lossy, alpha flattened against white. Quality must be 1 to 100.
    Jpeg { quality: u8 },
}

/// The complete, immutable parameter set for one edit pass.
///
/// The UI mutates a working copy and resubmits the whole value on every
/// change; the pipeline always re-renders from the original source buffer,
/// so repeated edits never accumulate rounding drift. `None` for `crop` or
/// `resize` means "leave the geometry unchanged", which makes the default
/// state render pixel-identically to the source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EditState {
    /// Crop region in source coordinates, or `None` for the full frame.
    pub crop: Option<CropRect>,
    pub adjustment: ColorAdjustment,
    pub filter: FilterSelection,
    /// Rotation about the buffer center, in degrees.
    pub rotation_degrees: f32,
    /// Output dimensions, or `None` to keep the current size.
    pub resize: Option<ResizeTarget>,
    pub overlay: Overlay,
}

impl EditState {
    /// Create the identity edit state.
    pub fn new() -> Self {
        Self::default()
    }
}
