//! Render pipeline: decode, crop, color correct, tint, encode.
//!
//! Every step after decoding is synchronous and pure. Decoding is the only
//! place a render may wait, so [`render_when_ready`] awaits the source bytes
//! and checks a [`CancelToken`] before and after the work.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::adjustments::{apply_color_transform, ColorTransform};
use crate::config::RenderConfig;
use crate::decode::{decode_image, encode_data_url, DecodeError, DecodedImage, SourceImage};
use crate::encode::{encode_jpeg, JPEG_MIME};
use crate::error::EditorError;
use crate::transform::{apply_crop, compute_crop_rect};
use crate::AdjustmentState;

/// Encoded output of a render and the state that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub state: AdjustmentState,
}

impl RenderResult {
    pub fn mime(&self) -> &'static str {
        JPEG_MIME
    }

    /// The output as a `data:image/jpeg;base64,...` string.
    pub fn to_data_url(&self) -> String {
        encode_data_url(self.mime(), &self.bytes)
    }
}

/// Shared flag used to abandon a pending render.
///
/// Clones observe the same flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Crop and color correct a decoded source, without encoding.
///
/// The source is never modified. Returns [`EditorError::InvalidSource`] when
/// the pixel buffer does not match the dimensions, and
/// [`EditorError::EmptyCrop`] when the crop rectangle for the state's mode has
/// no whole-pixel area.
pub fn render_preview(
    source: &SourceImage,
    state: &AdjustmentState,
) -> Result<DecodedImage, EditorError> {
    let expected = source.pixel_count() * 3;
    let actual = source.pixels.len() as u64;
    if actual != expected {
        return Err(EditorError::InvalidSource {
            width: source.width,
            height: source.height,
            expected,
            actual,
        });
    }

    let mode = state.crop_mode();
    let rect = compute_crop_rect(source.width, source.height, mode);
    let region = rect.to_pixels(source.width, source.height);

    if rect.is_empty() || region.is_empty() {
        return Err(EditorError::EmptyCrop {
            width: source.width,
            height: source.height,
            mode,
        });
    }

    tracing::debug!(
        %mode,
        x = region.x,
        y = region.y,
        width = region.width,
        height = region.height,
        "Cropping source"
    );

    let mut output = apply_crop(source, region);

    let transform = ColorTransform::from_state(state);
    if !transform.is_identity() {
        apply_color_transform(&mut output.pixels, &transform);
    }

    Ok(output)
}

/// Render an already decoded source to JPEG.
pub fn render_decoded(
    source: &SourceImage,
    state: &AdjustmentState,
    config: &RenderConfig,
) -> Result<RenderResult, EditorError> {
    let output = render_preview(source, state)?;
    let bytes = encode_jpeg(&output, config.effective_quality())?;

    Ok(RenderResult {
        bytes,
        width: output.width,
        height: output.height,
        state: *state,
    })
}

/// Decode `bytes` and render them with `state`.
///
/// # Errors
/// - [`EditorError::Decode`] if the bytes are not a readable image
/// - [`EditorError::EmptyCrop`] if the crop has no area
/// - [`EditorError::Encode`] if the output cannot be encoded
pub fn render(
    bytes: &[u8],
    state: &AdjustmentState,
    config: &RenderConfig,
) -> Result<RenderResult, EditorError> {
    let source = decode_image(bytes, config)?;
    render_decoded(&source, state, config)
}

/// Await the source bytes, then render them unless `cancel` fired.
///
/// `state` is taken by value: later edits do not affect a render already in
/// flight. A cancelled render returns [`EditorError::Abandoned`] and its
/// output, if any, is dropped.
pub async fn render_when_ready<F>(
    source: F,
    state: AdjustmentState,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Result<RenderResult, EditorError>
where
    F: Future<Output = Result<Vec<u8>, DecodeError>>,
{
    if cancel.is_cancelled() {
        tracing::warn!("Render abandoned before the source was requested");
        return Err(EditorError::Abandoned);
    }

    let bytes = source.await?;
    if cancel.is_cancelled() {
        tracing::warn!(bytes = bytes.len(), "Render abandoned while loading the source");
        return Err(EditorError::Abandoned);
    }

    let result = render(&bytes, &state, config)?;
    if cancel.is_cancelled() {
        tracing::warn!("Render abandoned after completion, result discarded");
        return Err(EditorError::Abandoned);
    }

    Ok(result)
}
