// ── Resource screens ──
//
// One admin screen: a collection store, the current search and facet
// filters, and a form session. Thin composition over the pieces below it.

use std::fmt;
use std::sync::Arc;

use realty_api::ResourceClient;

use crate::error::CoreError;
use crate::filter::{CategoryFilter, FilterSpec, Filterable};
use crate::form::{FormSession, SubmitPolicy};
use crate::model::Draft;
use crate::store::{CollectionSnapshot, OptimisticCollectionStore, ResourceBackend};

pub struct ResourceScreen<T: Draft, B = ResourceClient<T>> {
    store: Arc<OptimisticCollectionStore<T, B>>,
    filters: FilterSpec,
    form: FormSession<T>,
}

impl<T, B> ResourceScreen<T, B>
where
    T: Draft + Filterable,
    B: ResourceBackend<T>,
{
    pub fn new(store: Arc<OptimisticCollectionStore<T, B>>, policy: SubmitPolicy) -> Self {
        Self {
            store,
            filters: FilterSpec::new(),
            form: FormSession::new(policy),
        }
    }

    pub fn store(&self) -> &Arc<OptimisticCollectionStore<T, B>> {
        &self.store
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        self.store.snapshot()
    }

    // ── Filtering ────────────────────────────────────────────────────

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.set_search(term);
    }

    pub fn set_category(&mut self, facet: impl Into<String>, filter: CategoryFilter) {
        self.filters.set_category(facet, filter);
    }

    /// The cached collection narrowed by the current filters.
    pub fn visible(&self) -> Vec<Arc<T>> {
        self.filters.apply(&self.store.snapshot().items())
    }

    // ── Data ─────────────────────────────────────────────────────────

    pub async fn load(&self) -> Result<(), CoreError> {
        self.store.refresh().await
    }

    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<Arc<T>, CoreError> {
        self.store.update_optimistic(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.store.delete_optimistic(id).await
    }

    // ── Form ─────────────────────────────────────────────────────────

    pub fn form(&self) -> &FormSession<T> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession<T> {
        &mut self.form
    }

    /// Open the form on the cached entity with `id`.
    pub fn edit(&mut self, id: &str) -> Result<&mut T, CoreError> {
        let entity = self
            .store
            .snapshot()
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: T::NAME,
                id: id.to_owned(),
            })?;
        self.form.begin_edit(&entity)
    }

    pub async fn submit(&mut self) -> Result<Arc<T>, CoreError> {
        self.form.submit(&self.store).await
    }
}

impl<T: Draft, B> fmt::Debug for ResourceScreen<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceScreen")
            .field("entity", &T::NAME)
            .field("filters", &self.filters)
            .field("mode", self.form.mode())
            .finish_non_exhaustive()
    }
}
