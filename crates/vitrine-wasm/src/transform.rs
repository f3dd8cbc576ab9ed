//! WASM bindings for crop geometry.
//!
//! The admin UI uses the rectangle to draw the crop frame over the live
//! preview; the render path computes it again on its own.

use crate::error::js_error;
use crate::types::JsDecodedImage;
use vitrine_core::transform::{apply_crop, compute_crop_rect as core_crop_rect, CropRect};
use vitrine_core::CropMode;
use wasm_bindgen::prelude::*;

/// Crop rectangle in source pixel coordinates.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }

    /// Whether the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn parse_mode(mode: &str) -> Result<CropMode, JsValue> {
    mode.parse().map_err(|e| js_error("Invalid crop mode", e))
}

/// Compute the centered crop rectangle for a source size and crop mode.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rect = compute_crop_rect(img.naturalWidth, img.naturalHeight, 'vertical');
/// ctx.strokeRect(rect.x * scale, rect.y * scale, rect.width * scale, rect.height * scale);
/// ```
#[wasm_bindgen]
pub fn compute_crop_rect(width: u32, height: u32, mode: &str) -> Result<JsCropRect, JsValue> {
    Ok(JsCropRect {
        inner: core_crop_rect(width, height, parse_mode(mode)?),
    })
}

/// Crop an image to a mode's aspect ratio, without color adjustments.
#[wasm_bindgen]
pub fn crop_to_mode(image: &JsDecodedImage, mode: &str) -> Result<JsDecodedImage, JsValue> {
    let mode = parse_mode(mode)?;
    let src = image
        .to_decoded()
        .ok_or_else(|| js_error("Crop failed", "pixel buffer does not match dimensions"))?;

    let region = core_crop_rect(src.width, src.height, mode).to_pixels(src.width, src.height);
    Ok(JsDecodedImage::from_decoded(apply_crop(&src, region)))
}
