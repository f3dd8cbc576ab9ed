//! `data:` URL wrapping for image payloads.
//!
//! The upload form reads files with `FileReader.readAsDataURL`, and content
//! entities store images as `data:image/jpeg;base64,...` strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::DecodeError;

/// Extract the raw bytes from a base64 `data:` URL.
///
/// The media type is not checked here; whether the payload is an image is
/// decided by [`super::decode_image`].
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, DecodeError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(DecodeError::InvalidDataUrl(
            "payload is not base64 encoded".to_string(),
        ));
    }

    if payload.is_empty() {
        return Err(DecodeError::Empty);
    }

    STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidDataUrl(e.to_string()))
}

/// Wrap bytes in a base64 `data:` URL with the given media type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
