//! Editor session: one target, one evolving adjustment state.

use std::future::Future;

use crate::config::RenderConfig;
use crate::decode::DecodeError;
use crate::error::EditorError;
use crate::persist::{save, ImageStore};
use crate::pipeline::{render_when_ready, CancelToken, RenderResult};
use crate::target::{resolve, InvalidTargetError, PersistOp, TargetReference};
use crate::{AdjustmentField, AdjustmentState, CropMode};

/// State of an open editor.
///
/// Each edit replaces the adjustment state with a new value. Renders snapshot
/// the state when they start, so edits made while a render is loading its
/// source only affect later renders. Closing the session abandons every
/// render still in flight.
#[derive(Debug)]
pub struct EditorSession {
    target: TargetReference,
    state: AdjustmentState,
    config: RenderConfig,
    cancel: CancelToken,
}

impl EditorSession {
    /// Open an editor for `target` with neutral adjustments.
    ///
    /// Fails if the target does not name a content entity.
    pub fn open(target: TargetReference, config: RenderConfig) -> Result<Self, InvalidTargetError> {
        let op = resolve(&target)?;
        tracing::debug!(reference = %target, %op, "Opened editor session");

        Ok(Self {
            target,
            state: AdjustmentState::new(),
            config,
            cancel: CancelToken::new(),
        })
    }

    pub fn target(&self) -> &TargetReference {
        &self.target
    }

    pub fn state(&self) -> &AdjustmentState {
        &self.state
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Set one field, clamped into its domain. Returns the new state.
    pub fn update(&mut self, field: AdjustmentField, value: f32) -> AdjustmentState {
        self.state = self.state.with_field(field, value);
        self.state
    }

    pub fn set_crop_mode(&mut self, mode: CropMode) -> AdjustmentState {
        self.state = self.state.with_crop_mode(mode);
        self.state
    }

    /// Back to neutral adjustments and the default crop mode.
    pub fn reset(&mut self) {
        self.state = AdjustmentState::new();
    }

    /// Close the editor. Pending renders resolve to [`EditorError::Abandoned`].
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(reference = %self.target, "Closed editor session");
        }
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token observed by this session's renders.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Render the source produced by `source` with the current state.
    pub async fn render<F>(&self, source: F) -> Result<RenderResult, EditorError>
    where
        F: Future<Output = Result<Vec<u8>, DecodeError>>,
    {
        render_when_ready(source, self.state, &self.config, &self.cancel).await
    }

    /// Render, then persist to the session's target.
    ///
    /// Nothing reaches `store` if the session was closed before the render
    /// finished.
    pub async fn save<F, S>(&self, source: F, store: &S) -> Result<PersistOp, EditorError>
    where
        F: Future<Output = Result<Vec<u8>, DecodeError>>,
        S: ImageStore + ?Sized,
    {
        let result = self.render(source).await?;
        if self.is_closed() {
            tracing::warn!(reference = %self.target, "Editor closed before save, result discarded");
            return Err(EditorError::Abandoned);
        }
        save(store, &self.target, &result).await
    }
}
