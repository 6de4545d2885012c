// ── Config blob store ──
//
// For data without per-item identity (homepage statistics, site settings):
// the whole value is fetched, edited locally, and saved back in one call.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use realty_api::ApiClient;

use super::notice::{Notifier, title_case};
use crate::error::CoreError;
use crate::model::{SiteSettings, StatisticsBoard};

/// A value saved and loaded as a whole.
pub trait ConfigBlob: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAME: &'static str;
    const PATH: &'static str;
    /// Field the value is wrapped in on the wire (`{"statistics": [...]}`).
    /// `None` for a bare body.
    const KEY: Option<&'static str>;
}

impl ConfigBlob for StatisticsBoard {
    const NAME: &'static str = "statistics";
    const PATH: &'static str = "page/statistics";
    const KEY: Option<&'static str> = Some("statistics");
}

impl ConfigBlob for SiteSettings {
    const NAME: &'static str = "site settings";
    const PATH: &'static str = "settings";
    const KEY: Option<&'static str> = None;
}

/// Where a blob is loaded from and saved to.
pub trait BlobBackend<V: ConfigBlob>: Send + Sync + 'static {
    /// `Ok(None)` when the backend holds no value yet.
    fn fetch(&self) -> impl Future<Output = Result<Option<V>, CoreError>> + Send;

    fn store(&self, value: &V) -> impl Future<Output = Result<(), CoreError>> + Send;
}

// ── Remote ───────────────────────────────────────────────────────────

pub struct RemoteBlob<V> {
    api: ApiClient,
    _marker: PhantomData<fn() -> V>,
}

impl<V> RemoteBlob<V> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }
}

impl<V> fmt::Debug for RemoteBlob<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBlob").field("api", &self.api).finish()
    }
}

/// Pull the blob out of a response body.
fn unwrap_blob<V: ConfigBlob>(body: &str) -> Result<Option<V>, CoreError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let decode = |e: serde_json::Error| CoreError::Decode {
        message: format!("{} response: {e}", V::NAME),
    };
    let value: Value = serde_json::from_str(body).map_err(decode)?;
    let inner = match V::KEY {
        Some(key) => value.get(key).cloned().unwrap_or(Value::Null),
        None => value,
    };
    if inner.is_null() {
        return Ok(None);
    }
    serde_json::from_value(inner).map(Some).map_err(decode)
}

fn wrap_blob<V: ConfigBlob>(value: &V) -> Result<Value, CoreError> {
    let encoded = serde_json::to_value(value).map_err(|e| CoreError::Internal(e.to_string()))?;
    Ok(match V::KEY {
        Some(key) => {
            let mut map = serde_json::Map::new();
            map.insert(key.to_owned(), encoded);
            Value::Object(map)
        }
        None => encoded,
    })
}

impl<V: ConfigBlob> BlobBackend<V> for RemoteBlob<V> {
    async fn fetch(&self) -> Result<Option<V>, CoreError> {
        let body = self.api.get_text(V::PATH, &[]).await?;
        unwrap_blob(&body)
    }

    async fn store(&self, value: &V) -> Result<(), CoreError> {
        let body = wrap_blob(value)?;
        self.api.post_json(V::PATH, &body).await?;
        Ok(())
    }
}

// ── Local ────────────────────────────────────────────────────────────

/// In-memory blob, for settings without a backend endpoint.
#[derive(Debug, Default)]
pub struct LocalBlobBackend<V> {
    value: Mutex<Option<V>>,
}

impl<V: ConfigBlob> LocalBlobBackend<V> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }
}

impl<V: ConfigBlob> BlobBackend<V> for LocalBlobBackend<V> {
    async fn fetch(&self) -> Result<Option<V>, CoreError> {
        Ok(self
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn store(&self, value: &V) -> Result<(), CoreError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        Ok(())
    }
}

// ── Store ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct BlobSnapshot<V> {
    pub value: V,
    pub loading: bool,
    pub saving: bool,
    /// Local edits not yet saved.
    pub dirty: bool,
    pub last_error: Option<CoreError>,
}

/// Whole-value store with load / edit / save.
pub struct ConfigBlobStore<V: ConfigBlob, B = RemoteBlob<V>> {
    backend: B,
    state: watch::Sender<BlobSnapshot<V>>,
    notifier: Notifier,
}

impl<V: ConfigBlob, B: BlobBackend<V>> ConfigBlobStore<V, B> {
    /// Starts from `V::default()` until the first successful load.
    pub fn new(backend: B) -> Self {
        Self::with_notifier(backend, Notifier::default())
    }

    pub fn with_notifier(backend: B, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(BlobSnapshot::default());
        Self {
            backend,
            state,
            notifier,
        }
    }

    pub fn snapshot(&self) -> BlobSnapshot<V> {
        self.state.borrow().clone()
    }

    pub fn value(&self) -> V {
        self.state.borrow().value.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BlobSnapshot<V>> {
        self.state.subscribe()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Fetch the stored value. A missing value keeps the current one.
    pub async fn load(&self) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.loading = true);
        debug!(blob = V::NAME, "loading");

        match self.backend.fetch().await {
            Ok(fetched) => {
                self.state.send_modify(|s| {
                    if let Some(value) = fetched {
                        s.value = value;
                        s.dirty = false;
                    }
                    s.loading = false;
                    s.last_error = None;
                });
                Ok(())
            }
            Err(e) => {
                warn!(blob = V::NAME, error = %e, "load failed, keeping current value");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.last_error = Some(e.clone());
                });
                self.notifier.error(format!("Failed to load {}", V::NAME), &e);
                Err(e)
            }
        }
    }

    /// Edit the value locally. Nothing is sent until [`save`](Self::save).
    pub fn edit<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        let mut next = self.state.borrow().clone();
        let out = f(&mut next.value);
        next.dirty = true;
        self.state.send_replace(next);
        out
    }

    /// Replace the value with its defaults (unsaved).
    pub fn reset(&self) {
        self.edit(|v| *v = V::default());
    }

    /// Save the whole value. Failure keeps the local edits.
    pub async fn save(&self) -> Result<(), CoreError> {
        let value = self.state.borrow().value.clone();
        self.state.send_modify(|s| s.saving = true);
        debug!(blob = V::NAME, "saving");

        match self.backend.store(&value).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.saving = false;
                    s.dirty = false;
                    s.last_error = None;
                });
                self.notifier.success(format!("{} saved successfully", title_case(V::NAME)));
                Ok(())
            }
            Err(e) => {
                warn!(blob = V::NAME, error = %e, "save failed, keeping local edits");
                self.state.send_modify(|s| {
                    s.saving = false;
                    s.last_error = Some(e.clone());
                });
                self.notifier.error(format!("Failed to save {}", V::NAME), &e);
                Err(e)
            }
        }
    }
}

impl<V: ConfigBlob, B> fmt::Debug for ConfigBlobStore<V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.state.borrow();
        f.debug_struct("ConfigBlobStore")
            .field("blob", &V::NAME)
            .field("dirty", &snap.dirty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::StatisticField;
    use serde_json::json;

    #[test]
    fn statistics_unwrap_from_named_field() {
        let body = json!({ "statistics": [{ "icon": "home", "value": "7" }] }).to_string();
        let board: StatisticsBoard = unwrap_blob(&body).unwrap().unwrap();
        assert_eq!(board.entries()[0].value, "7");
    }

    #[test]
    fn missing_field_means_no_value() {
        assert!(unwrap_blob::<StatisticsBoard>(r#"{"message":"none"}"#).unwrap().is_none());
        assert!(unwrap_blob::<StatisticsBoard>("").unwrap().is_none());
    }

    #[test]
    fn statistics_wrap_for_save() {
        let body = wrap_blob(&StatisticsBoard::default()).unwrap();
        assert_eq!(body["statistics"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn local_settings_edit_and_save() {
        let store = ConfigBlobStore::new(LocalBlobBackend::<SiteSettings>::new());
        store.load().await.unwrap();
        assert_eq!(store.value(), SiteSettings::default());

        store.edit(|s| s.site_name = "Coastal Homes".into());
        assert!(store.snapshot().dirty);
        store.save().await.unwrap();
        assert!(!store.snapshot().dirty);

        store.reset();
        store.load().await.unwrap();
        assert_eq!(store.value().site_name, "Coastal Homes");
    }

    #[tokio::test]
    async fn edit_returns_closure_result() {
        let store = ConfigBlobStore::new(LocalBlobBackend::<StatisticsBoard>::new());
        let result = store.edit(|b| b.set_field(7, StatisticField::Value, "1"));
        assert!(result.is_err());
    }
}
