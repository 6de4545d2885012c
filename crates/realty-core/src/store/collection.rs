// ── Optimistic collection store ──
//
// Client-side cache of one resource collection. Mutations are applied to
// the cache first and reconciled against the backend afterwards; failures
// roll the cache back. State is published through a `watch` channel and
// outcomes through a `broadcast` channel of notices.
//
// Mutations against the same id are not serialized. Two overlapping calls
// may resolve out of order and leave the cache inconsistent until the next
// `refresh()`.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use realty_api::{Resource, ResourceClient};

use super::backend::ResourceBackend;
use super::notice::{Notice, Notifier, title_case};
use crate::error::CoreError;
use crate::model::EntryKey;
use crate::stream::CollectionStream;

// ── Snapshot types ───────────────────────────────────────────────────

/// One cached entity.
#[derive(Debug)]
pub struct Entry<T> {
    pub key: EntryKey,
    /// A create or update for this entry is awaiting the backend.
    pub pending: bool,
    pub item: Arc<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            pending: self.pending,
            item: Arc::clone(&self.item),
        }
    }
}

impl<T: Resource> Entry<T> {
    fn settled(item: T) -> Self {
        Self {
            key: EntryKey::for_id(item.id()),
            pending: false,
            item: Arc::new(item),
        }
    }

    fn has_id(&self, id: &str) -> bool {
        self.key.as_server().is_some_and(|k| k.as_str() == id)
    }
}

/// Point-in-time view of a collection.
#[derive(Debug)]
pub struct CollectionSnapshot<T> {
    pub entries: Vec<Entry<T>>,
    pub loading: bool,
    pub last_error: Option<CoreError>,
}

impl<T> Default for CollectionSnapshot<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

impl<T> Clone for CollectionSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            loading: self.loading,
            last_error: self.last_error.clone(),
        }
    }
}

impl<T: Resource> CollectionSnapshot<T> {
    /// Entities in collection order.
    pub fn items(&self) -> Vec<Arc<T>> {
        self.entries.iter().map(|e| Arc::clone(&e.item)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.entries.iter().find(|e| e.has_id(id)).map(|e| &e.item)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.has_id(id))
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.pending).count()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Entry<T>> {
        self.entries.iter_mut().find(|e| e.has_id(id))
    }

    fn ids_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.entries.iter().all(|e| seen.insert(&e.key))
    }
}

// ── Store ────────────────────────────────────────────────────────────

/// Optimistic cache of one resource collection.
///
/// Methods take `&self`; several mutations on different entries may be in
/// flight at once.
pub struct OptimisticCollectionStore<T: Resource, B = ResourceClient<T>> {
    backend: B,
    state: watch::Sender<CollectionSnapshot<T>>,
    notifier: Notifier,
}

impl<T: Resource, B: ResourceBackend<T>> OptimisticCollectionStore<T, B> {
    pub fn new(backend: B) -> Self {
        Self::with_notifier(backend, Notifier::default())
    }

    /// Share a notice channel with other stores.
    pub fn with_notifier(backend: B, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(CollectionSnapshot::default());
        Self {
            backend,
            state,
            notifier,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionSnapshot<T>> {
        self.state.subscribe()
    }

    pub fn stream(&self) -> CollectionStream<T> {
        CollectionStream::new(self.state.subscribe())
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Reload the whole collection, discarding optimistic state.
    ///
    /// On failure the previous entries are kept and the error recorded.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.loading = true);
        debug!(entity = T::NAME, "refreshing collection");

        match self.backend.list().await {
            Ok(items) => {
                let count = items.len();
                self.write(|s| {
                    s.entries = items.into_iter().map(Entry::settled).collect();
                    s.loading = false;
                    s.last_error = None;
                });
                debug!(entity = T::NAME, count, "collection refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(entity = T::NAME, error = %e, "refresh failed, keeping cached entries");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.last_error = Some(e.clone());
                });
                self.notifier
                    .error(format!("Failed to load {} list", T::NAME), &e);
                Err(e)
            }
        }
    }

    // ── Create ───────────────────────────────────────────────────────

    /// Append `draft` as a pending entry, then create it on the backend.
    ///
    /// Success replaces the pending entry in place with the server's
    /// entity. Failure removes it.
    pub async fn create_optimistic(&self, draft: T) -> Result<Arc<T>, CoreError> {
        let local = EntryKey::local();
        self.write(|s| {
            s.entries.push(Entry {
                key: local.clone(),
                pending: true,
                item: Arc::new(draft.clone()),
            });
        });
        debug!(entity = T::NAME, key = %local, "optimistic create");

        match self.backend.create(&draft).await {
            Ok(created) => {
                let created = Arc::new(created);
                let key = EntryKey::for_id(created.id());
                self.write(|s| {
                    let settled = Entry {
                        key: key.clone(),
                        pending: false,
                        item: Arc::clone(&created),
                    };
                    if let Some(slot) = s.entries.iter_mut().find(|e| e.key == local) {
                        *slot = settled;
                    } else if !s.entries.iter().any(|e| e.key == key) {
                        // a refresh replaced the collection while we waited
                        s.entries.push(settled);
                    }
                });
                self.notifier
                    .success(format!("{} created successfully", title_case(T::NAME)));
                Ok(created)
            }
            Err(e) => {
                warn!(entity = T::NAME, error = %e, "create failed, removing pending entry");
                self.write(|s| s.entries.retain(|entry| entry.key != local));
                self.notifier
                    .error(format!("Failed to create {}", T::NAME), &e);
                Err(e)
            }
        }
    }

    // ── Update ───────────────────────────────────────────────────────

    /// Patch the entry in place, then send the patch to the backend.
    ///
    /// Failure restores the entry exactly as it was before the call.
    pub async fn update_optimistic(&self, id: &str, patch: T::Patch) -> Result<Arc<T>, CoreError> {
        let mut before: Option<(Arc<T>, bool)> = None;
        self.state.send_if_modified(|s| {
            let Some(entry) = s.find_mut(id) else {
                return false;
            };
            before = Some((Arc::clone(&entry.item), entry.pending));
            let mut next = T::clone(&entry.item);
            next.apply_patch(&patch);
            entry.item = Arc::new(next);
            entry.pending = true;
            true
        });
        let Some((previous, was_pending)) = before else {
            return Err(Self::not_found(id));
        };
        debug!(entity = T::NAME, id, "optimistic update");

        match self.backend.update(id, &patch).await {
            Ok(echoed) => {
                let mut current = None;
                self.write(|s| {
                    if let Some(entry) = s.find_mut(id) {
                        if let Some(echo) = echoed {
                            match echo.overlay(entry.item.as_ref()) {
                                Ok(merged) => entry.item = Arc::new(merged),
                                Err(e) => {
                                    warn!(entity = T::NAME, id, error = %e, "ignoring malformed echo");
                                }
                            }
                        }
                        entry.pending = false;
                        current = Some(Arc::clone(&entry.item));
                    }
                });
                self.notifier
                    .success(format!("{} updated successfully", title_case(T::NAME)));
                current.ok_or_else(|| Self::not_found(id))
            }
            Err(e) => {
                warn!(entity = T::NAME, id, error = %e, "update failed, rolling back");
                self.write(|s| {
                    if let Some(entry) = s.find_mut(id) {
                        entry.item = previous;
                        entry.pending = was_pending;
                    }
                });
                self.notifier
                    .error(format!("Failed to update {}", T::NAME), &e);
                Err(e)
            }
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Remove the entry, then delete it on the backend.
    ///
    /// Failure reinserts it at its original position.
    pub async fn delete_optimistic(&self, id: &str) -> Result<(), CoreError> {
        let mut removed: Option<(usize, Entry<T>)> = None;
        self.state.send_if_modified(|s| {
            let Some(index) = s.position(id) else {
                return false;
            };
            removed = Some((index, s.entries.remove(index)));
            true
        });
        let Some((index, entry)) = removed else {
            return Err(Self::not_found(id));
        };
        debug!(entity = T::NAME, id, index, "optimistic delete");

        match self.backend.remove(id).await {
            Ok(()) => {
                self.notifier
                    .success(format!("{} deleted successfully", title_case(T::NAME)));
                Ok(())
            }
            Err(e) => {
                warn!(entity = T::NAME, id, error = %e, "delete failed, restoring entry");
                self.write(|s| {
                    if !s.entries.iter().any(|other| other.key == entry.key) {
                        let at = index.min(s.entries.len());
                        s.entries.insert(at, entry);
                    }
                });
                self.notifier
                    .error(format!("Failed to delete {}", T::NAME), &e);
                Err(e)
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn write(&self, f: impl FnOnce(&mut CollectionSnapshot<T>)) {
        self.state.send_modify(|s| {
            f(s);
            debug_assert!(s.ids_unique(), "duplicate entry keys in {} collection", T::NAME);
        });
    }

    fn not_found(id: &str) -> CoreError {
        CoreError::NotFound {
            entity: T::NAME,
            id: id.to_owned(),
        }
    }
}

impl<T: Resource, B> fmt::Debug for OptimisticCollectionStore<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.state.borrow();
        f.debug_struct("OptimisticCollectionStore")
            .field("entity", &T::NAME)
            .field("entries", &snap.entries.len())
            .field("loading", &snap.loading)
            .finish_non_exhaustive()
    }
}
