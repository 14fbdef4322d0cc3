//! Geometric transform operations: cropping, rotation, and resizing.
//!
//! The pipeline always invokes these in the fixed order crop -> rotate ->
//! resize. Cropping first bounds the work done by the more expensive
//! resampling stages.
//!
//! # Coordinate System
//!
//! - Crop coordinates are source-buffer pixels with the origin at the
//!   top-left corner
//! - Rotation angles are in degrees, positive = counter-clockwise, about the
//!   buffer center
//! - Resize targets are exact output dimensions; aspect ratio is the
//!   caller's concern

mod crop;
mod resize;
mod rotation;

pub use crop::apply_crop;
pub use resize::apply_resize;
pub use rotation::{apply_rotation, compute_rotated_bounds};
