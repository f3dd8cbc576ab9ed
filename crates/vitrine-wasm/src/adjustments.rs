//! Adjustment state bindings.
//!
//! Setters clamp into each field's domain, the same way the core state does,
//! so the value read back may differ from the value written.

use crate::error::js_error;
use crate::types::JsDecodedImage;
use vitrine_core::{
    apply_color_transform, AdjustmentField, AdjustmentState, ColorTransform, CropMode,
};
use wasm_bindgen::prelude::*;

/// Adjustment state wrapper for JavaScript
#[wasm_bindgen]
pub struct JsAdjustmentState {
    inner: AdjustmentState,
}

#[wasm_bindgen]
impl JsAdjustmentState {
    /// Neutral adjustments with square crop
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: AdjustmentState::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness()
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.set(AdjustmentField::Brightness, value);
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast()
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.set(AdjustmentField::Contrast, value);
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation()
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.set(AdjustmentField::Saturation, value);
    }

    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f32 {
        self.inner.hue()
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: f32) {
        self.set(AdjustmentField::Hue, value);
    }

    /// White balance in Kelvin
    #[wasm_bindgen(getter)]
    pub fn white_balance(&self) -> f32 {
        self.inner.white_balance()
    }

    #[wasm_bindgen(setter)]
    pub fn set_white_balance(&mut self, value: f32) {
        self.set(AdjustmentField::WhiteBalance, value);
    }

    /// One of `square`, `vertical`, `horizontal`, `free`
    #[wasm_bindgen(getter)]
    pub fn crop_mode(&self) -> String {
        self.inner.crop_mode().to_string()
    }

    /// Change the crop mode by name
    pub fn set_crop_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: CropMode = mode.parse().map_err(|e| js_error("Invalid crop mode", e))?;
        self.inner = self.inner.with_crop_mode(mode);
        Ok(())
    }

    /// Set a field by its name (`brightness`, `whiteBalance`, ...)
    pub fn set_field(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        let field: AdjustmentField = name.parse().map_err(|e| js_error("Invalid field", e))?;
        self.set(field, value);
        Ok(())
    }

    /// Back to neutral adjustments and square crop
    pub fn reset(&mut self) {
        self.inner = AdjustmentState::new();
    }

    /// Check if every color adjustment is at its neutral value
    pub fn is_neutral(&self) -> bool {
        self.inner.is_neutral()
    }

    /// Serialize to a plain object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| js_error("Serialize failed", e))
    }

    /// Deserialize from a plain object. Missing fields are neutral, values are clamped.
    pub fn from_json(value: JsValue) -> Result<JsAdjustmentState, JsValue> {
        let inner: AdjustmentState =
            serde_wasm_bindgen::from_value(value).map_err(|e| js_error("Deserialize failed", e))?;
        Ok(Self { inner })
    }
}

impl Default for JsAdjustmentState {
    fn default() -> Self {
        Self::new()
    }
}

impl JsAdjustmentState {
    pub(crate) fn inner(&self) -> &AdjustmentState {
        &self.inner
    }

    fn set(&mut self, field: AdjustmentField, value: f32) {
        self.inner = self.inner.with_field(field, value);
    }
}

/// Apply the color adjustments (no crop) to an image.
///
/// Returns a new image; the input is left untouched.
///
/// # Example (TypeScript)
/// ```typescript
/// const state = new JsAdjustmentState();
/// state.saturation = 140;
/// const adjusted = apply_adjustments(preview, state);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(image: &JsDecodedImage, state: &JsAdjustmentState) -> JsDecodedImage {
    let mut pixels = image.pixels();
    let transform = ColorTransform::from_state(state.inner());
    if !transform.is_identity() {
        apply_color_transform(&mut pixels, &transform);
    }
    JsDecodedImage::new(image.width(), image.height(), pixels)
}
