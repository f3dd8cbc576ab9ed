//! Output encoding.
//!
//! Rendered images are stored as JPEG; the quality comes from
//! [`crate::RenderConfig`] and defaults to 90.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, JPEG_MIME};
