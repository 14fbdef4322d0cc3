//! The staged render pipeline.
//!
//! `render` is a pure function of `(source, state)`: it validates the edit
//! state against the source dimensions, then runs the fixed stage order
//! crop -> color adjust -> rotate -> resize -> overlay. Each stage consumes
//! the previous stage's buffer and returns a new one; the source is never
//! mutated, so re-rendering the same inputs is byte-identical and repeated
//! edits cannot accumulate drift.
//!
//! The stage order is deliberate: cropping first bounds the work done by the
//! resampling stages, color math runs before any resampling can smear it,
//! and the overlay lands last so its phase and angle are defined in the
//! pixel space the viewer actually sees.

use thiserror::Error;

use crate::adjustments::apply_adjustments;
use crate::buffer::PixelBuffer;
use crate::overlay::composite;
use crate::transform::{apply_crop, apply_resize, apply_rotation};
use crate::{ColorAdjustment, CropRect, EditState, FilterSelection, Overlay, ResizeTarget};

/// Errors for edit states that cannot be sensibly clamped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The crop rectangle has no overlap with the source image.
    #[error("invalid crop: {rect:?} does not intersect a {width}x{height} image")]
    InvalidCrop {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    /// The resize target has a zero dimension.
    #[error("invalid resize target: width ({width}) and height ({height}) must be non-zero")]
    InvalidResizeTarget { width: u32, height: u32 },
}

/// An edit state resolved against a concrete source buffer: rects clamped,
/// sliders clamped, angles normalized.
#[derive(Debug, Clone, Copy)]
struct ResolvedState {
    crop: Option<CropRect>,
    adjustment: ColorAdjustment,
    filter: FilterSelection,
    rotation_degrees: f32,
    resize: Option<ResizeTarget>,
    overlay: Overlay,
}

/// Validate and clamp an edit state against the source dimensions.
///
/// Slider-style parameters are clamped into range rather than rejected;
/// only shapes with no sensible clamp (an empty crop, a zero resize target)
/// produce an error.
fn validate(source: &PixelBuffer, state: &EditState) -> Result<ResolvedState, PipelineError> {
    let crop = match state.crop {
        None => None,
        Some(rect) => Some(rect.clamp_to(source.width, source.height).ok_or(
            PipelineError::InvalidCrop {
                rect,
                width: source.width,
                height: source.height,
            },
        )?),
    };

    let resize = match state.resize {
        None => None,
        Some(target) => {
            if target.width == 0 || target.height == 0 {
                return Err(PipelineError::InvalidResizeTarget {
                    width: target.width,
                    height: target.height,
                });
            }
            Some(target)
        }
    };

    Ok(ResolvedState {
        crop,
        adjustment: state.adjustment.clamped(),
        filter: state.filter.clamped(),
        rotation_degrees: state.rotation_degrees.rem_euclid(360.0),
        resize,
        overlay: state.overlay.clamped(),
    })
}

/// Render an edit state against a source buffer.
///
/// Pure and idempotent: the same `(source, state)` always produces the same
/// bytes, and the default `EditState` reproduces the source exactly.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidCrop`] when the crop rectangle does not
/// intersect the source, and [`PipelineError::InvalidResizeTarget`] when the
/// resize target has a zero dimension. All other out-of-range parameters are
/// clamped, not rejected.
pub fn render(source: &PixelBuffer, state: &EditState) -> Result<PixelBuffer, PipelineError> {
    let resolved = validate(source, state)?;

    let mut working = match resolved.crop {
        Some(rect) => apply_crop(source, &rect),
        None => source.clone(),
    };

    working = apply_adjustments(&working, &resolved.adjustment, &resolved.filter);
    working = apply_rotation(&working, resolved.rotation_degrees);

    if let Some(target) = resolved.resize {
        working = apply_resize(&working, &target);
    }

    Ok(composite(&working, &resolved.overlay))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
