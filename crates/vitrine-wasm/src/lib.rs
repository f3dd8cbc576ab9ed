//! Vitrine WASM - WebAssembly bindings for the Vitrine image editor
//!
//! This crate exposes the vitrine-core engine to the admin site's
//! TypeScript code. Persistence stays on the JavaScript side: the bindings
//! produce JPEG bytes or a data URL plus the field they belong in.
//!
//! # Module Structure
//!
//! - `adjustments` - Adjustment state wrapper and color-only preview
//! - `render` - Full render (decode, crop, color, encode)
//! - `target` - Target reference resolution
//! - `transform` - Crop rectangle computation
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsAdjustmentState, JsRenderConfig, render_data_url, resolve_target } from '@vitrine/wasm';
//!
//! await init();
//!
//! const state = new JsAdjustmentState();
//! state.brightness = 120;
//! state.set_crop_mode('vertical');
//!
//! const dataUrl = render_data_url(uploadedDataUrl, state, new JsRenderConfig());
//! const op = resolve_target(`item:${itemId}`);
//! await api.update(op.entity, op.entity_id, { [op.field]: dataUrl });
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod error;
mod render;
mod target;
mod transform;
mod types;

pub use adjustments::{apply_adjustments, JsAdjustmentState};
pub use render::{decode_image, render_data_url, render_image, render_preview, JsRenderConfig};
pub use target::{resolve_target, JsPersistOp};
pub use transform::{compute_crop_rect, crop_to_mode, JsCropRect};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
