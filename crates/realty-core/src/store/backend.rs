// ── Store backends ──
//
// The optimistic store reconciles against a `ResourceBackend`: the remote
// `ResourceClient`, or an in-memory collection for screens whose API does
// not exist yet.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use realty_api::{Echo, Resource, ResourceClient};

use crate::error::CoreError;
use crate::model::{EntityId, LocalResource};

/// Source of truth a collection store reconciles against.
pub trait ResourceBackend<T: Resource>: Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<T>, CoreError>> + Send;

    fn create(&self, draft: &T) -> impl Future<Output = Result<T, CoreError>> + Send;

    /// Apply a partial update. Returns the fields the backend echoed back.
    fn update(
        &self,
        id: &str,
        patch: &T::Patch,
    ) -> impl Future<Output = Result<Option<Echo>, CoreError>> + Send;

    fn remove(&self, id: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl<T: Resource> ResourceBackend<T> for ResourceClient<T> {
    async fn list(&self) -> Result<Vec<T>, CoreError> {
        Ok(ResourceClient::list(self, &[]).await?)
    }

    async fn create(&self, draft: &T) -> Result<T, CoreError> {
        Ok(ResourceClient::create(self, draft).await?)
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<Echo>, CoreError> {
        Ok(ResourceClient::update(self, id, patch).await?)
    }

    async fn remove(&self, id: &str) -> Result<(), CoreError> {
        Ok(ResourceClient::remove(self, id).await?)
    }
}

// ── In-memory backend ────────────────────────────────────────────────

/// In-memory collection that assigns its own identifiers.
///
/// Stands in for a remote API: every call succeeds unless the id is unknown.
#[derive(Debug, Default)]
pub struct LocalBackend<T> {
    items: Mutex<Vec<T>>,
}

impl<T: LocalResource> LocalBackend<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Seed the collection. Items without an id get one.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let items = items
            .into_iter()
            .map(|mut item| {
                if item.id().is_none() {
                    item.assign_id(EntityId::generate());
                }
                item
            })
            .collect();
        Self {
            items: Mutex::new(items),
        }
    }

    fn with_items_mut<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut guard = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn not_found(id: &str) -> CoreError {
        CoreError::NotFound {
            entity: T::NAME,
            id: id.to_owned(),
        }
    }
}

impl<T: LocalResource> ResourceBackend<T> for LocalBackend<T> {
    async fn list(&self) -> Result<Vec<T>, CoreError> {
        Ok(self.with_items_mut(|items| items.clone()))
    }

    async fn create(&self, draft: &T) -> Result<T, CoreError> {
        let mut created = draft.clone();
        let id = EntityId::generate();
        debug!(entity = T::NAME, %id, "local create");
        created.assign_id(id);
        self.with_items_mut(|items| items.push(created.clone()));
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<Echo>, CoreError> {
        self.with_items_mut(|items| {
            let item = items
                .iter_mut()
                .find(|item| item.id() == Some(id))
                .ok_or_else(|| Self::not_found(id))?;
            item.apply_patch(patch);
            let echo = Echo::of(&*item).map_err(|e| CoreError::Internal(e.to_string()))?;
            Ok(Some(echo))
        })
    }

    async fn remove(&self, id: &str) -> Result<(), CoreError> {
        self.with_items_mut(|items| {
            let index = items
                .iter()
                .position(|item| item.id() == Some(id))
                .ok_or_else(|| Self::not_found(id))?;
            items.remove(index);
            Ok(())
        })
    }
}
