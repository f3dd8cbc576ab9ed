//! Color transform: the editor's filter chain and white-balance tint.
//!
//! ## Operation Order
//! 1. Brightness (multiply)
//! 2. Contrast (scale around mid-gray)
//! 3. Saturation (filter-effects saturate matrix)
//! 4. Hue rotation (filter-effects hue-rotate matrix)
//! 5. White-balance tint, composited with an overlay blend
//!
//! The operations follow the CSS filter-effects definitions used by the
//! editor's canvas preview, so the saved image matches what was shown.
//! Each operation clamps its output to the displayable range.

use crate::{AdjustmentState, NEUTRAL_WHITE_BALANCE};

/// Overlay color for white balance below neutral (warming).
pub const WARM_TINT: [u8; 3] = [255, 147, 41];
/// Overlay color for white balance above neutral (cooling).
pub const COOL_TINT: [u8; 3] = [41, 147, 255];
/// Maximum tint overlay opacity.
pub const MAX_TINT_ALPHA: f32 = 0.15;
/// Kelvin distance from neutral at which the tint reaches full strength.
pub const TINT_RANGE_KELVIN: f32 = 2000.0;

/// A single per-pixel color operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOp {
    /// Multiply every channel (1.0 = unchanged).
    Brightness(f32),
    /// Scale distance from mid-gray (1.0 = unchanged).
    Contrast(f32),
    /// Saturation amount (1.0 = unchanged, 0.0 = grayscale).
    Saturation(f32),
    /// Hue rotation in degrees.
    HueRotate(f32),
}

/// Flat color composited over the whole image to approximate white balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintOverlay {
    pub color: [u8; 3],
    /// Opacity in `[0, MAX_TINT_ALPHA]`.
    pub alpha: f32,
}

/// Ordered color operations plus an optional tint overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorTransform {
    ops: Vec<ColorOp>,
    tint: Option<TintOverlay>,
}

impl ColorTransform {
    /// Build the transform for an adjustment state.
    ///
    /// Operations at their neutral value are left out, so the neutral state
    /// produces an empty chain and no tint.
    pub fn from_state(state: &AdjustmentState) -> Self {
        let mut ops = Vec::with_capacity(4);

        if state.brightness() != 100.0 {
            ops.push(ColorOp::Brightness(state.brightness() / 100.0));
        }
        if state.contrast() != 100.0 {
            ops.push(ColorOp::Contrast(state.contrast() / 100.0));
        }
        if state.saturation() != 100.0 {
            ops.push(ColorOp::Saturation(state.saturation() / 100.0));
        }
        if state.hue() % 360.0 != 0.0 {
            ops.push(ColorOp::HueRotate(state.hue()));
        }

        Self {
            ops,
            tint: white_balance_tint(state.white_balance()),
        }
    }

    pub fn ops(&self) -> &[ColorOp] {
        &self.ops
    }

    pub fn tint(&self) -> Option<TintOverlay> {
        self.tint
    }

    /// True when applying this transform leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty() && self.tint.is_none()
    }
}

/// Map a color temperature to its tint overlay.
///
/// Below 6500 K the overlay is warm, above it is cool, and at exactly 6500 K
/// there is none. Opacity grows linearly with the distance from neutral and
/// saturates at [`MAX_TINT_ALPHA`] once that distance reaches
/// [`TINT_RANGE_KELVIN`]. Both branches use the same opacity formula.
pub fn white_balance_tint(kelvin: f32) -> Option<TintOverlay> {
    let delta = kelvin - NEUTRAL_WHITE_BALANCE;
    if delta == 0.0 || delta.is_nan() {
        return None;
    }

    let factor = delta.abs() / TINT_RANGE_KELVIN;
    let alpha = (factor * MAX_TINT_ALPHA).clamp(0.0, MAX_TINT_ALPHA);
    let color = if delta < 0.0 { WARM_TINT } else { COOL_TINT };
    Some(TintOverlay { color, alpha })
}

/// Apply the full transform (operations, then tint) to RGB pixels in place.
pub fn apply_color_transform(pixels: &mut [u8], transform: &ColorTransform) {
    apply_color_ops(pixels, transform.ops());
    if let Some(tint) = transform.tint() {
        apply_tint_overlay(pixels, tint);
    }
}

/// Apply color operations to RGB pixels in place, in slice order.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `ops` - Operations to apply; an empty slice leaves pixels untouched
pub fn apply_color_ops(pixels: &mut [u8], ops: &[ColorOp]) {
    if ops.is_empty() {
        return;
    }

    // Matrices depend only on the op, not the pixel
    let stages: Vec<Stage> = ops.iter().map(|op| Stage::from_op(*op)).collect();

    for chunk in pixels.chunks_exact_mut(3) {
        let mut rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];

        for stage in &stages {
            rgb = stage.apply(rgb);
        }

        chunk[0] = to_u8(rgb[0]);
        chunk[1] = to_u8(rgb[1]);
        chunk[2] = to_u8(rgb[2]);
    }
}

/// Composite a flat tint over RGB pixels in place using an overlay blend.
///
/// Overlay darkens channels below mid-gray and lightens those above it, so the
/// tint follows the image's tones instead of washing it out. Pure black and
/// pure white are left unchanged.
pub fn apply_tint_overlay(pixels: &mut [u8], tint: TintOverlay) {
    if tint.alpha <= 0.0 {
        return;
    }

    let blend = [
        tint.color[0] as f32 / 255.0,
        tint.color[1] as f32 / 255.0,
        tint.color[2] as f32 / 255.0,
    ];
    let alpha = tint.alpha.min(1.0);

    for chunk in pixels.chunks_exact_mut(3) {
        for (channel, &b) in chunk.iter_mut().zip(blend.iter()) {
            let base = *channel as f32 / 255.0;
            let blended = overlay(base, b);
            *channel = to_u8(base + (blended - base) * alpha);
        }
    }
}

/// Overlay blend of one channel (`base` is the image, `blend` the tint).
#[inline]
fn overlay(base: f32, blend: f32) -> f32 {
    if base < 0.5 {
        2.0 * base * blend
    } else {
        1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A color op with its per-pixel constants resolved.
enum Stage {
    Scale(f32),
    Contrast(f32),
    Matrix([[f32; 3]; 3]),
}

impl Stage {
    fn from_op(op: ColorOp) -> Self {
        match op {
            ColorOp::Brightness(amount) => Stage::Scale(amount),
            ColorOp::Contrast(amount) => Stage::Contrast(amount),
            ColorOp::Saturation(amount) => Stage::Matrix(saturate_matrix(amount)),
            ColorOp::HueRotate(degrees) => Stage::Matrix(hue_rotate_matrix(degrees)),
        }
    }

    #[inline]
    fn apply(&self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let out = match self {
            Stage::Scale(k) => [r * k, g * k, b * k],
            Stage::Contrast(k) => [
                (r - 0.5) * k + 0.5,
                (g - 0.5) * k + 0.5,
                (b - 0.5) * k + 0.5,
            ],
            Stage::Matrix(m) => [
                m[0][0] * r + m[0][1] * g + m[0][2] * b,
                m[1][0] * r + m[1][1] * g + m[1][2] * b,
                m[2][0] * r + m[2][1] * g + m[2][2] * b,
            ],
        };
        [
            out[0].clamp(0.0, 1.0),
            out[1].clamp(0.0, 1.0),
            out[2].clamp(0.0, 1.0),
        ]
    }
}

/// Filter-effects `saturate()` matrix.
fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

/// Filter-effects `hue-rotate()` matrix.
fn hue_rotate_matrix(degrees: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdjustmentField;

    /// Helper to apply a state to a single pixel
    fn apply(pixel: [u8; 3], state: &AdjustmentState) -> [u8; 3] {
        let mut px = pixel.to_vec();
        apply_color_transform(&mut px, &ColorTransform::from_state(state));
        [px[0], px[1], px[2]]
    }

    fn with(field: AdjustmentField, value: f32) -> AdjustmentState {
        AdjustmentState::new().with_field(field, value)
    }

    // ===== Identity Tests =====

    #[test]
    fn test_neutral_state_is_identity() {
        let transform = ColorTransform::from_state(&AdjustmentState::new());
        assert!(transform.ops().is_empty());
        assert_eq!(transform.tint(), None);
        assert!(transform.is_identity());

        let mut pixels: Vec<u8> = (0..=255).collect();
        pixels.truncate(255); // 85 whole pixels
        let original = pixels.clone();
        apply_color_transform(&mut pixels, &transform);
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_full_turn_hue_is_omitted() {
        let transform = ColorTransform::from_state(&with(AdjustmentField::Hue, 360.0));
        assert!(transform.is_identity());
    }

    // ===== Chain Construction =====

    #[test]
    fn test_chain_order_is_fixed() {
        let state = AdjustmentState::new()
            .with_field(AdjustmentField::Hue, 90.0)
            .with_field(AdjustmentField::Saturation, 150.0)
            .with_field(AdjustmentField::Contrast, 80.0)
            .with_field(AdjustmentField::Brightness, 120.0);
        let transform = ColorTransform::from_state(&state);

        assert_eq!(
            transform.ops(),
            &[
                ColorOp::Brightness(1.2),
                ColorOp::Contrast(0.8),
                ColorOp::Saturation(1.5),
                ColorOp::HueRotate(90.0),
            ]
        );
    }

    #[test]
    fn test_brightness_before_contrast() {
        // Brightness first: 200/255 * 1.5 clips to 1.0, then contrast 0.5 -> 0.75
        // (contrast first would give ~246)
        let state = AdjustmentState::new()
            .with_field(AdjustmentField::Brightness, 150.0)
            .with_field(AdjustmentField::Contrast, 50.0);
        assert_eq!(apply([200, 200, 200], &state), [191, 191, 191]);
    }

    // ===== Individual Operations =====

    #[test]
    fn test_brightness_scales() {
        assert_eq!(
            apply([100, 50, 20], &with(AdjustmentField::Brightness, 150.0)),
            [150, 75, 30]
        );
        assert_eq!(
            apply([100, 50, 20], &with(AdjustmentField::Brightness, 50.0)),
            [50, 25, 10]
        );
    }

    #[test]
    fn test_contrast_pivots_at_mid_gray() {
        let result = apply([64, 128, 192], &with(AdjustmentField::Contrast, 150.0));
        assert!(result[0] < 64, "Dark pixel should get darker");
        assert!((result[1] as i32 - 128).abs() <= 1, "Mid gray should stay put");
        assert!(result[2] > 192, "Bright pixel should get brighter");
    }

    #[test]
    fn test_zero_saturation_is_grayscale() {
        let result = apply([200, 100, 50], &with(AdjustmentField::Saturation, 0.0));
        assert_eq!(result[0], result[1]);
        assert_eq!(result[1], result[2]);
    }

    #[test]
    fn test_saturation_increase_spreads_channels() {
        let result = apply([200, 128, 100], &with(AdjustmentField::Saturation, 200.0));
        let orig_spread = 200 - 100;
        let new_spread = result[0] as i32 - result[2] as i32;
        assert!(new_spread > orig_spread);
    }

    #[test]
    fn test_hue_rotation_keeps_gray() {
        let result = apply([128, 128, 128], &with(AdjustmentField::Hue, 180.0));
        for c in result {
            assert!((c as i32 - 128).abs() <= 1);
        }
    }

    #[test]
    fn test_hue_rotation_moves_red_toward_green() {
        let result = apply([220, 30, 30], &with(AdjustmentField::Hue, 120.0));
        assert!(result[1] > result[0], "Red rotated 120 degrees should read green");
    }

    // ===== White Balance =====

    #[test]
    fn test_no_tint_at_neutral() {
        assert_eq!(white_balance_tint(6500.0), None);
    }

    #[test]
    fn test_warm_tint() {
        let tint = white_balance_tint(5500.0).unwrap();
        assert_eq!(tint.color, WARM_TINT);
        assert!((tint.alpha - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_cool_tint() {
        let tint = white_balance_tint(7500.0).unwrap();
        assert_eq!(tint.color, COOL_TINT);
        assert!((tint.alpha - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_tint_saturates() {
        assert_eq!(white_balance_tint(3000.0).unwrap().alpha, MAX_TINT_ALPHA);
        assert_eq!(white_balance_tint(9000.0).unwrap().alpha, MAX_TINT_ALPHA);
    }

    #[test]
    fn test_warm_overlay_on_mid_gray() {
        let result = apply([128, 128, 128], &with(AdjustmentField::WhiteBalance, 4500.0));
        assert!(result[0] > 128, "Red should rise when warming");
        assert!(result[2] < 128, "Blue should fall when warming");
    }

    #[test]
    fn test_cool_overlay_on_mid_gray() {
        let result = apply([128, 128, 128], &with(AdjustmentField::WhiteBalance, 8500.0));
        assert!(result[0] < 128, "Red should fall when cooling");
        assert!(result[2] > 128, "Blue should rise when cooling");
    }

    #[test]
    fn test_overlay_keeps_black_and_white() {
        let state = with(AdjustmentField::WhiteBalance, 3000.0);
        assert_eq!(apply([0, 0, 0], &state), [0, 0, 0]);
        assert_eq!(apply([255, 255, 255], &state), [255, 255, 255]);
    }

    // ===== Edge Cases =====

    #[test]
    fn test_empty_pixels() {
        let mut pixels: Vec<u8> = vec![];
        let transform = ColorTransform::from_state(&with(AdjustmentField::Brightness, 140.0));
        apply_color_transform(&mut pixels, &transform);
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_incomplete_pixel_ignored() {
        let mut pixels = vec![100, 100, 100, 64];
        apply_color_ops(&mut pixels, &[ColorOp::Brightness(1.5)]);
        assert_eq!(pixels, vec![150, 150, 150, 64]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::AdjustmentField;
    use proptest::prelude::*;

    proptest! {
        /// Property: The neutral state leaves any buffer unchanged.
        #[test]
        fn prop_neutral_identity(pixels in proptest::collection::vec(any::<u8>(), 0..300)) {
            let mut out = pixels.clone();
            apply_color_transform(&mut out, &ColorTransform::from_state(&AdjustmentState::new()));
            prop_assert_eq!(out, pixels);
        }

        /// Property: Tint opacity never decreases with distance from neutral.
        #[test]
        fn prop_tint_monotonic(a in 0.0f32..=3000.0, b in 0.0f32..=3000.0) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let alpha = |delta: f32, sign: f32| {
                white_balance_tint(NEUTRAL_WHITE_BALANCE + sign * delta)
                    .map_or(0.0, |t| t.alpha)
            };
            prop_assert!(alpha(near, 1.0) <= alpha(far, 1.0));
            prop_assert!(alpha(near, -1.0) <= alpha(far, -1.0));
        }

        /// Property: Warm and cool branches share the opacity formula.
        #[test]
        fn prop_tint_symmetric(delta in 1.0f32..=2500.0) {
            let warm = white_balance_tint(NEUTRAL_WHITE_BALANCE - delta).unwrap();
            let cool = white_balance_tint(NEUTRAL_WHITE_BALANCE + delta).unwrap();
            prop_assert!((warm.alpha - cool.alpha).abs() < 1e-6);
            prop_assert_eq!(warm.color, WARM_TINT);
            prop_assert_eq!(cool.color, COOL_TINT);
        }

        /// Property: Tint opacity is strictly increasing below saturation.
        #[test]
        fn prop_tint_strictly_increasing(delta in 1.0f32..1900.0) {
            let a = white_balance_tint(NEUTRAL_WHITE_BALANCE + delta).unwrap().alpha;
            let b = white_balance_tint(NEUTRAL_WHITE_BALANCE + delta + 50.0).unwrap().alpha;
            prop_assert!(a < b);
        }

        /// Property: Any in-domain state produces a same-length buffer.
        #[test]
        fn prop_transform_preserves_length(
            brightness in 50.0f32..=150.0,
            contrast in 50.0f32..=150.0,
            saturation in 0.0f32..=200.0,
            hue in 0.0f32..=360.0,
            white_balance in 3000.0f32..=9000.0,
            pixels in proptest::collection::vec(any::<u8>(), 0..90),
        ) {
            let state = AdjustmentState::new()
                .with_field(AdjustmentField::Brightness, brightness)
                .with_field(AdjustmentField::Contrast, contrast)
                .with_field(AdjustmentField::Saturation, saturation)
                .with_field(AdjustmentField::Hue, hue)
                .with_field(AdjustmentField::WhiteBalance, white_balance);
            let mut out = pixels.clone();
            apply_color_transform(&mut out, &ColorTransform::from_state(&state));
            prop_assert_eq!(out.len(), pixels.len());
        }
    }
}
