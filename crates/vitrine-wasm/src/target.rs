//! Target resolution bindings.

use crate::error::js_error;
use vitrine_core::{resolve, PersistOp, TargetReference};
use wasm_bindgen::prelude::*;

/// Where an edited image must be written.
#[wasm_bindgen]
pub struct JsPersistOp {
    inner: PersistOp,
}

#[wasm_bindgen]
impl JsPersistOp {
    /// `siteConfig`, `collection` or `jewelryItem`
    #[wasm_bindgen(getter)]
    pub fn entity(&self) -> String {
        self.inner.entity.kind().to_string()
    }

    /// Entity id, absent for the site configuration
    #[wasm_bindgen(getter)]
    pub fn entity_id(&self) -> Option<String> {
        self.inner.entity.id().map(str::to_string)
    }

    /// Image field name on the entity (`logo_base64`, `hero_image_base64`, `image_base64`)
    #[wasm_bindgen(getter)]
    pub fn field(&self) -> String {
        self.inner.field.as_str().to_string()
    }

    pub fn describe(&self) -> String {
        self.inner.to_string()
    }
}

/// Resolve `logo`, `hero`, `collection:<id>` or `item:<id>`.
#[wasm_bindgen]
pub fn resolve_target(reference: &str) -> Result<JsPersistOp, JsValue> {
    let target: TargetReference = reference
        .parse()
        .map_err(|e| js_error("Invalid target", e))?;
    let inner = resolve(&target).map_err(|e| js_error("Invalid target", e))?;
    Ok(JsPersistOp { inner })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_logo() {
        let op = resolve_target("logo").unwrap();
        assert_eq!(op.entity(), "siteConfig");
        assert_eq!(op.entity_id(), None);
        assert_eq!(op.field(), "logo_base64");
    }

    #[test]
    fn test_resolve_item() {
        let op = resolve_target("item:ring-7").unwrap();
        assert_eq!(op.entity(), "jewelryItem");
        assert_eq!(op.entity_id().as_deref(), Some("ring-7"));
        assert_eq!(op.field(), "image_base64");
        assert_eq!(op.describe(), "attach image to jewelry item ring-7");
    }
}
