//! Error conversion at the JavaScript boundary.

use std::fmt::Display;

use wasm_bindgen::JsValue;

/// Turn a failure into a JS `Error` and log it to the browser console.
pub(crate) fn js_error(context: &str, err: impl Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::error_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}
