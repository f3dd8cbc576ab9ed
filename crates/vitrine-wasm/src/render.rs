//! Render bindings.
//!
//! Decoding happens synchronously here: by the time JavaScript calls in, the
//! upload has already been read into memory. Abandoning a render on close is
//! the caller's job (drop the result instead of saving it).
//!
//! # Example
//!
//! ```typescript
//! const config = new JsRenderConfig();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const jpeg = render_image(bytes, state, config);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::adjustments::JsAdjustmentState;
use crate::error::js_error;
use crate::types::JsDecodedImage;
use vitrine_core::decode::{self, decode_data_url};
use vitrine_core::pipeline;
use vitrine_core::RenderConfig;
use wasm_bindgen::prelude::*;

/// Render settings for JavaScript. Defaults: quality 90, EXIF orientation on.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct JsRenderConfig {
    inner: RenderConfig,
}

#[wasm_bindgen]
impl JsRenderConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn jpeg_quality(&self) -> u8 {
        self.inner.jpeg_quality
    }

    #[wasm_bindgen(setter)]
    pub fn set_jpeg_quality(&mut self, quality: u8) {
        self.inner.jpeg_quality = quality;
    }

    #[wasm_bindgen(getter)]
    pub fn apply_exif_orientation(&self) -> bool {
        self.inner.apply_exif_orientation
    }

    #[wasm_bindgen(setter)]
    pub fn set_apply_exif_orientation(&mut self, apply: bool) {
        self.inner.apply_exif_orientation = apply;
    }

    /// Deserialize from a plain object such as `{ jpegQuality: 80 }`
    pub fn from_json(value: JsValue) -> Result<JsRenderConfig, JsValue> {
        let inner: RenderConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| js_error("Invalid config", e))?;
        Ok(Self { inner })
    }
}

/// Decode image bytes into an RGB image at natural size.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], config: &JsRenderConfig) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes, &config.inner)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| js_error("Decode failed", e))
}

/// Crop and color correct a decoded image without encoding it.
#[wasm_bindgen]
pub fn render_preview(
    image: &JsDecodedImage,
    state: &JsAdjustmentState,
) -> Result<JsDecodedImage, JsValue> {
    let src = image
        .to_decoded()
        .ok_or_else(|| js_error("Render failed", "pixel buffer does not match dimensions"))?;
    pipeline::render_preview(&src, state.inner())
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| js_error("Render failed", e))
}

/// Decode, crop, adjust and encode `bytes` to JPEG.
#[wasm_bindgen]
pub fn render_image(
    bytes: &[u8],
    state: &JsAdjustmentState,
    config: &JsRenderConfig,
) -> Result<Vec<u8>, JsValue> {
    pipeline::render(bytes, state.inner(), &config.inner)
        .map(|result| result.bytes)
        .map_err(|e| js_error("Render failed", e))
}

/// Render a `data:` URL (as produced by `FileReader.readAsDataURL`) and
/// return the result as a `data:image/jpeg;base64,...` URL.
#[wasm_bindgen]
pub fn render_data_url(
    data_url: &str,
    state: &JsAdjustmentState,
    config: &JsRenderConfig,
) -> Result<String, JsValue> {
    let bytes = decode_data_url(data_url).map_err(|e| js_error("Render failed", e))?;
    pipeline::render(&bytes, state.inner(), &config.inner)
        .map(|result| result.to_data_url())
        .map_err(|e| js_error("Render failed", e))
}
