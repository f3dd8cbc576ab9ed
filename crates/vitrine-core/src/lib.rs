//! Vitrine Core - Image adjustment and crop engine
//!
//! This crate provides the image editing engine behind the Vitrine admin
//! surface: crop geometry, color correction, rendering, and the mapping from
//! an edited image to the content entity that receives it.
//!
//! # Render Order
//! 1. Decode (the only suspension point)
//! 2. Crop to the mode's aspect ratio
//! 3. Brightness, contrast, saturation, hue
//! 4. White-balance tint overlay
//! 5. JPEG encode

pub mod adjustments;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod persist;
pub mod pipeline;
pub mod session;
pub mod target;
pub mod transform;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adjustments::{apply_color_transform, ColorOp, ColorTransform, TintOverlay};
pub use config::RenderConfig;
pub use decode::{DecodeError, DecodedImage, SourceImage};
pub use error::EditorError;
pub use persist::{save, ImageStore, MemoryStore, PersistenceError};
pub use pipeline::{render, render_preview, CancelToken, RenderResult};
pub use session::EditorSession;
pub use target::{resolve, EntityRef, ImageField, InvalidTargetError, PersistOp, TargetReference};
pub use transform::{apply_crop, compute_crop_rect, CropRect};

/// Brightness domain in percent.
pub const BRIGHTNESS_RANGE: (f32, f32) = (50.0, 150.0);
/// Contrast domain in percent.
pub const CONTRAST_RANGE: (f32, f32) = (50.0, 150.0);
/// Saturation domain in percent.
pub const SATURATION_RANGE: (f32, f32) = (0.0, 200.0);
/// Hue rotation domain in degrees.
pub const HUE_RANGE: (f32, f32) = (0.0, 360.0);
/// White balance domain in Kelvin.
pub const WHITE_BALANCE_RANGE: (f32, f32) = (3000.0, 9000.0);

/// Neutral white balance: no tint overlay is applied at this temperature.
pub const NEUTRAL_WHITE_BALANCE: f32 = 6500.0;

/// Aspect-ratio policy used to select the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// 1:1
    #[default]
    Square,
    /// 3:4 (width / height = 0.75)
    Vertical,
    /// 4:3
    Horizontal,
    /// Full source bounds, no cropping.
    Free,
}

impl CropMode {
    /// Target width / height ratio, or `None` for [`CropMode::Free`].
    pub fn aspect_ratio(self) -> Option<f64> {
        match self {
            CropMode::Square => Some(1.0),
            CropMode::Vertical => Some(3.0 / 4.0),
            CropMode::Horizontal => Some(4.0 / 3.0),
            CropMode::Free => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CropMode::Square => "square",
            CropMode::Vertical => "vertical",
            CropMode::Horizontal => "horizontal",
            CropMode::Free => "free",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that does not match any adjustment field or crop mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {name:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl FromStr for CropMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(CropMode::Square),
            "vertical" => Ok(CropMode::Vertical),
            "horizontal" => Ok(CropMode::Horizontal),
            "free" => Ok(CropMode::Free),
            _ => Err(UnknownName {
                kind: "crop mode",
                name: s.to_string(),
            }),
        }
    }
}

/// Numeric fields of [`AdjustmentState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentField {
    Brightness,
    Contrast,
    Saturation,
    Hue,
    WhiteBalance,
}

impl AdjustmentField {
    /// Inclusive domain `(min, max)` of this field.
    pub fn range(self) -> (f32, f32) {
        match self {
            AdjustmentField::Brightness => BRIGHTNESS_RANGE,
            AdjustmentField::Contrast => CONTRAST_RANGE,
            AdjustmentField::Saturation => SATURATION_RANGE,
            AdjustmentField::Hue => HUE_RANGE,
            AdjustmentField::WhiteBalance => WHITE_BALANCE_RANGE,
        }
    }

    /// Value at which the field has no effect.
    pub fn neutral(self) -> f32 {
        match self {
            AdjustmentField::Brightness
            | AdjustmentField::Contrast
            | AdjustmentField::Saturation => 100.0,
            AdjustmentField::Hue => 0.0,
            AdjustmentField::WhiteBalance => NEUTRAL_WHITE_BALANCE,
        }
    }

    /// Clamp a value into this field's domain.
    ///
    /// NaN has no position in the domain and maps to the neutral value.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.neutral();
        }
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl FromStr for AdjustmentField {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "brightness" => Ok(AdjustmentField::Brightness),
            "contrast" => Ok(AdjustmentField::Contrast),
            "saturation" => Ok(AdjustmentField::Saturation),
            "hue" => Ok(AdjustmentField::Hue),
            "whiteBalance" | "white_balance" => Ok(AdjustmentField::WhiteBalance),
            _ => Err(UnknownName {
                kind: "adjustment field",
                name: s.to_string(),
            }),
        }
    }
}

/// Editing parameters for one editor session.
///
/// Immutable: every change produces a new value through [`with_field`] or
/// [`with_crop_mode`], and every numeric field is kept inside its domain.
///
/// [`with_field`]: AdjustmentState::with_field
/// [`with_crop_mode`]: AdjustmentState::with_crop_mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAdjustments", rename_all = "camelCase")]
pub struct AdjustmentState {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    hue: f32,
    white_balance: f32,
    crop_mode: CropMode,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue: 0.0,
            white_balance: NEUTRAL_WHITE_BALANCE,
            crop_mode: CropMode::Square,
        }
    }
}

impl AdjustmentState {
    /// Create the neutral state (square crop, no color change).
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with one field replaced by `value` clamped to its domain.
    pub fn with_field(&self, field: AdjustmentField, value: f32) -> Self {
        let value = field.clamp(value);
        let mut next = *self;
        match field {
            AdjustmentField::Brightness => next.brightness = value,
            AdjustmentField::Contrast => next.contrast = value,
            AdjustmentField::Saturation => next.saturation = value,
            AdjustmentField::Hue => next.hue = value,
            AdjustmentField::WhiteBalance => next.white_balance = value,
        }
        next
    }

    /// Return a copy with the crop mode replaced.
    pub fn with_crop_mode(&self, crop_mode: CropMode) -> Self {
        Self { crop_mode, ..*self }
    }

    pub fn get(&self, field: AdjustmentField) -> f32 {
        match field {
            AdjustmentField::Brightness => self.brightness,
            AdjustmentField::Contrast => self.contrast,
            AdjustmentField::Saturation => self.saturation,
            AdjustmentField::Hue => self.hue,
            AdjustmentField::WhiteBalance => self.white_balance,
        }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn white_balance(&self) -> f32 {
        self.white_balance
    }

    pub fn crop_mode(&self) -> CropMode {
        self.crop_mode
    }

    /// Check whether every color parameter is at its neutral value.
    ///
    /// The crop mode is not a color parameter and is ignored.
    pub fn is_neutral(&self) -> bool {
        let neutral = Self::default();
        self.brightness == neutral.brightness
            && self.contrast == neutral.contrast
            && self.saturation == neutral.saturation
            && self.hue == neutral.hue
            && self.white_balance == neutral.white_balance
    }
}

/// Wire form of [`AdjustmentState`]; missing fields take neutral values and
/// every value is clamped on the way in.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAdjustments {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    hue: f32,
    white_balance: f32,
    crop_mode: CropMode,
}

impl Default for RawAdjustments {
    fn default() -> Self {
        let neutral = AdjustmentState::default();
        Self {
            brightness: neutral.brightness,
            contrast: neutral.contrast,
            saturation: neutral.saturation,
            hue: neutral.hue,
            white_balance: neutral.white_balance,
            crop_mode: neutral.crop_mode,
        }
    }
}

impl From<RawAdjustments> for AdjustmentState {
    fn from(raw: RawAdjustments) -> Self {
        AdjustmentState::new()
            .with_field(AdjustmentField::Brightness, raw.brightness)
            .with_field(AdjustmentField::Contrast, raw.contrast)
            .with_field(AdjustmentField::Saturation, raw.saturation)
            .with_field(AdjustmentField::Hue, raw.hue)
            .with_field(AdjustmentField::WhiteBalance, raw.white_balance)
            .with_crop_mode(raw.crop_mode)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
