//! Persistence boundary.
//!
//! The engine never talks to the content backend itself. An [`ImageStore`]
//! implementation (an HTTP client in the admin app, [`MemoryStore`] in tests)
//! receives the resolved [`PersistOp`] and the encoded image.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::error::EditorError;
use crate::pipeline::RenderResult;
use crate::target::{resolve, PersistOp, TargetReference};

/// Failure reported by a store. Surfaced as-is, never retried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The backend refused the update (e.g. unknown id, not authorized).
    #[error("Save rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or did not answer.
    #[error("Save failed: {0}")]
    Transport(String),
}

/// Writes an encoded image to a content entity's image field.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn persist(&self, op: &PersistOp, image: &RenderResult) -> Result<(), PersistenceError>;
}

/// Resolve `target` and hand `image` to `store`.
///
/// Returns the operation that was carried out.
pub async fn save<S>(
    store: &S,
    target: &TargetReference,
    image: &RenderResult,
) -> Result<PersistOp, EditorError>
where
    S: ImageStore + ?Sized,
{
    let op = resolve(target)?;

    match store.persist(&op, image).await {
        Ok(()) => {
            tracing::info!(
                reference = %target,
                bytes = image.bytes.len(),
                width = image.width,
                height = image.height,
                "Saved edited image"
            );
            Ok(op)
        }
        Err(err) => {
            tracing::warn!(reference = %target, error = %err, "Saving edited image failed");
            Err(err.into())
        }
    }
}

/// In-memory store keeping the latest data URL per operation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    images: Mutex<HashMap<PersistOp, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data URL last stored for `op`.
    pub fn get(&self, op: &PersistOp) -> Option<String> {
        self.images().get(op).cloned()
    }

    pub fn len(&self) -> usize {
        self.images().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Writes are single inserts; a poisoned map is still whole.
    fn images(&self) -> MutexGuard<'_, HashMap<PersistOp, String>> {
        self.images.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn persist(&self, op: &PersistOp, image: &RenderResult) -> Result<(), PersistenceError> {
        self.images().insert(op.clone(), image.to_data_url());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{EntityRef, InvalidTargetError};
    use crate::AdjustmentState;

    struct RejectingStore;

    #[async_trait]
    impl ImageStore for RejectingStore {
        async fn persist(&self, _: &PersistOp, _: &RenderResult) -> Result<(), PersistenceError> {
            Err(PersistenceError::Rejected("collection not found".to_string()))
        }
    }

    fn result() -> RenderResult {
        RenderResult {
            bytes: vec![0xFF, 0xD8, 0xFF],
            width: 1,
            height: 1,
            state: AdjustmentState::new(),
        }
    }

    #[tokio::test]
    async fn test_save_to_memory_store() {
        let store = MemoryStore::new();
        let target = TargetReference::Collection("c1".into());

        let op = save(&store, &target, &result()).await.unwrap();

        assert_eq!(op.entity, EntityRef::Collection("c1".into()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&op).as_deref(), Some("data:image/jpeg;base64,/9j/"));
    }

    #[tokio::test]
    async fn test_save_overwrites_same_target() {
        let store = MemoryStore::new();
        save(&store, &TargetReference::Logo, &result()).await.unwrap();
        save(&store, &TargetReference::Logo, &result()).await.unwrap();
        save(&store, &TargetReference::Hero, &result()).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_save_invalid_target_never_reaches_store() {
        let store = MemoryStore::new();
        let err = save(&store, &TargetReference::JewelryItem(String::new()), &result())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EditorError::InvalidTarget(InvalidTargetError::MissingId("jewelry item"))
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_surfaces_store_failure() {
        let err = save(&RejectingStore, &TargetReference::Collection("gone".into()), &result())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::Persistence(PersistenceError::Rejected("collection not found".into()))
        );
    }

    #[tokio::test]
    async fn test_memory_store_survives_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryStore::new());
        save(&*store, &TargetReference::Logo, &result()).await.unwrap();

        let poisoner = std::sync::Arc::clone(&store);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.images.lock().unwrap();
            panic!("writer panicked while holding the lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(store.images.is_poisoned());

        let logo = resolve(&TargetReference::Logo).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(&logo).is_some());

        let op = save(&*store, &TargetReference::Hero, &result()).await.unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(&op).is_some());
    }
}
