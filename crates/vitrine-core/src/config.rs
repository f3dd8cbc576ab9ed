//! Render configuration.
//!
//! All fields have defaults, so an empty object (or no config at all) gives
//! the editor's standard output: JPEG at quality 90, EXIF orientation applied.

use serde::{Deserialize, Serialize};

/// Default JPEG quality, the canvas `toDataURL('image/jpeg', 0.9)` equivalent.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default source size limit (80 megapixels).
pub const DEFAULT_MAX_SOURCE_PIXELS: u64 = 80_000_000;

/// Settings shared by every render of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// JPEG quality (1-100). Out-of-range values are clamped at encode time.
    pub jpeg_quality: u8,
    /// Apply the source's EXIF orientation before cropping.
    pub apply_exif_orientation: bool,
    /// Sources with more pixels than this fail to decode.
    pub max_source_pixels: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            apply_exif_orientation: true,
            max_source_pixels: DEFAULT_MAX_SOURCE_PIXELS,
        }
    }
}

impl RenderConfig {
    /// The quality actually handed to the encoder.
    pub fn effective_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
