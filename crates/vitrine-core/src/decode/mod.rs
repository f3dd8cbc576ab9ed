//! Source image decoding.
//!
//! This module provides functionality for:
//! - Decoding uploaded images (JPEG, PNG, GIF, WebP) to RGB buffers
//! - Applying EXIF orientation so pixels match what the browser displays
//! - Unwrapping `data:` URLs produced by the upload form
//!
//! Decoding is the only step of a render that waits on outside input; see
//! [`crate::pipeline`] for how it is awaited and abandoned.

mod data_url;
mod reader;
mod types;

pub use data_url::{decode_data_url, encode_data_url};
pub use reader::decode_image;
pub use types::{DecodeError, DecodedImage, Orientation, SourceImage};
