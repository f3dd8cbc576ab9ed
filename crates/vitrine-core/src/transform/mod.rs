//! Crop geometry and the pixel copy that applies it.
//!
//! # Coordinate System
//!
//! - Rectangles are in source pixels, origin at the top-left corner
//! - [`CropRect`] keeps fractional offsets (a centered crop of an odd margin
//!   lands on a half pixel); [`PixelRect`] is the whole-pixel region drawn
//!   into the output buffer

mod crop;

pub use crop::{apply_crop, compute_crop_rect, CropRect, PixelRect};
