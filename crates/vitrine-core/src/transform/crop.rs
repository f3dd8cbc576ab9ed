//! Aspect-ratio cropping.
//!
//! The crop rectangle is the largest rectangle of the mode's aspect ratio that
//! fits inside the source, centered on the axis that has slack.
//!
//! # Example
//!
//! ```ignore
//! // A 300x300 source cropped to 3:4 keeps the full height
//! let rect = compute_crop_rect(300, 300, CropMode::Vertical);
//! assert_eq!((rect.x, rect.width, rect.height), (37.5, 225.0, 300.0));
//! ```

use crate::decode::DecodedImage;
use crate::CropMode;

/// Crop rectangle in source pixel coordinates.
///
/// Offsets may be fractional when the slack on the centered axis is odd.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Snap to whole pixels inside a `width` x `height` source.
    ///
    /// Offsets are floored and extents rounded, then the region is shrunk to
    /// stay inside the source.
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelRect {
        let x = (self.x.max(0.0).floor() as u32).min(width);
        let y = (self.y.max(0.0).floor() as u32).min(height);
        let w = (self.width.max(0.0).round() as u32).min(width - x);
        let h = (self.height.max(0.0).round() as u32).min(height - y);
        PixelRect {
            x,
            y,
            width: w,
            height: h,
        }
    }
}

/// Whole-pixel region of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Compute the crop rectangle for a `width` x `height` source.
///
/// - `Square`: `min(width, height)` on both sides, centered
/// - `Vertical` (3:4): full height, unless that would be wider than the source
/// - `Horizontal` (4:3): full width, unless that would be taller than the source
/// - `Free`: the full source bounds
///
/// A zero-area source yields a zero-area rectangle. The result always lies
/// within `[0, width] x [0, height]`.
pub fn compute_crop_rect(width: u32, height: u32, mode: CropMode) -> CropRect {
    let (src_w, src_h) = (width as f64, height as f64);

    let (w, h) = match mode {
        CropMode::Free => return CropRect::full(width, height),
        CropMode::Square => {
            let size = src_w.min(src_h);
            (size, size)
        }
        // Ratios are applied as multiply-then-divide so integer sources stay exact
        CropMode::Vertical => {
            let w = src_h * 3.0 / 4.0;
            if w > src_w {
                (src_w, src_w * 4.0 / 3.0)
            } else {
                (w, src_h)
            }
        }
        CropMode::Horizontal => {
            let h = src_w * 3.0 / 4.0;
            if h > src_h {
                (src_h * 4.0 / 3.0, src_h)
            } else {
                (src_w, h)
            }
        }
    };

    let w = w.clamp(0.0, src_w);
    let h = h.clamp(0.0, src_h);
    CropRect {
        x: ((src_w - w) / 2.0).clamp(0.0, src_w - w),
        y: ((src_h - h) / 2.0).clamp(0.0, src_h - h),
        width: w,
        height: h,
    }
}

/// Copy a region of `image` into a new buffer sized to the region.
///
/// The region must lie within the image; use [`CropRect::to_pixels`] to
/// obtain one. A region covering the whole image returns a clone.
///
/// Panics if `image.pixels` is shorter than `width * height * 3`.
/// [`crate::pipeline::render_preview`] checks this before cropping.
pub fn apply_crop(image: &DecodedImage, region: PixelRect) -> DecodedImage {
    // Fast path: full crop returns a clone
    if region.x == 0
        && region.y == 0
        && region.width == image.width
        && region.height == image.height
    {
        return image.clone();
    }

    let src_stride = image.width as usize * 3;
    let row_len = region.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    for y in region.y..region.y + region.height {
        let start = y as usize * src_stride + region.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(region.width, region.height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ratio_mode_strategy() -> impl Strategy<Value = CropMode> {
        prop_oneof![
            Just(CropMode::Square),
            Just(CropMode::Vertical),
            Just(CropMode::Horizontal),
        ]
    }

    fn any_mode_strategy() -> impl Strategy<Value = CropMode> {
        prop_oneof![ratio_mode_strategy(), Just(CropMode::Free)]
    }

    proptest! {
        /// Property: Ratio modes hit their aspect ratio exactly (up to float error).
        #[test]
        fn prop_aspect_ratio_matches_mode(
            width in 1u32..=5000,
            height in 1u32..=5000,
            mode in ratio_mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, mode);
            let target = mode.aspect_ratio().unwrap();
            let ratio = rect.width / rect.height;
            prop_assert!(
                (ratio - target).abs() < 1e-9,
                "{}x{} {:?}: got ratio {}, expected {}",
                width, height, mode, ratio, target
            );
        }

        /// Property: The rectangle lies within the source bounds.
        #[test]
        fn prop_rect_within_bounds(
            width in 0u32..=5000,
            height in 0u32..=5000,
            mode in any_mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, mode);
            prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
            prop_assert!(rect.x + rect.width <= width as f64 + 1e-9);
            prop_assert!(rect.y + rect.height <= height as f64 + 1e-9);
        }

        /// Property: One side of a ratio crop spans the full source.
        #[test]
        fn prop_ratio_crop_is_maximal(
            width in 1u32..=5000,
            height in 1u32..=5000,
            mode in ratio_mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, mode);
            prop_assert!(
                rect.width == width as f64 || rect.height == height as f64,
                "Neither side is full: {:?}", rect
            );
        }

        /// Property: The rectangle is centered on both axes.
        #[test]
        fn prop_rect_centered(
            width in 1u32..=5000,
            height in 1u32..=5000,
            mode in ratio_mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, mode);
            let left = rect.x;
            let right = width as f64 - (rect.x + rect.width);
            let top = rect.y;
            let bottom = height as f64 - (rect.y + rect.height);
            prop_assert!((left - right).abs() < 1e-6);
            prop_assert!((top - bottom).abs() < 1e-6);
        }

        /// Property: Free mode always yields the full source rectangle.
        #[test]
        fn prop_free_is_identity(width in 0u32..=5000, height in 0u32..=5000) {
            prop_assert_eq!(
                compute_crop_rect(width, height, CropMode::Free),
                CropRect::full(width, height)
            );
        }

        /// Property: Snapped regions stay inside the source and keep the ratio
        /// within a pixel of rounding.
        #[test]
        fn prop_pixel_rect_within_bounds(
            width in 1u32..=2000,
            height in 1u32..=2000,
            mode in any_mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, mode);
            let px = rect.to_pixels(width, height);
            prop_assert!(px.x + px.width <= width);
            prop_assert!(px.y + px.height <= height);
            prop_assert!((px.width as f64 - rect.width).abs() <= 1.0);
            prop_assert!((px.height as f64 - rect.height).abs() <= 1.0);
        }

        /// Property: Cropped buffers match the region dimensions.
        #[test]
        fn prop_apply_crop_dimensions(
            width in 1u32..=60,
            height in 1u32..=60,
            mode in any_mode_strategy(),
        ) {
            let img = DecodedImage::new(width, height, vec![7u8; (width * height * 3) as usize]);
            let region = compute_crop_rect(width, height, mode).to_pixels(width, height);
            let result = apply_crop(&img, region);
            prop_assert_eq!(result.width, region.width);
            prop_assert_eq!(result.height, region.height);
            prop_assert_eq!(result.pixels.len(), region.area() as usize * 3);
        }
    }
}
