// ── Client-side stores ──
//
// `OptimisticCollectionStore` caches identified collections and reconciles
// mutations against a `ResourceBackend`. `ConfigBlobStore` handles values
// that are saved whole.

mod backend;
mod blob;
mod collection;
mod notice;

pub use backend::{LocalBackend, ResourceBackend};
pub use blob::{BlobBackend, BlobSnapshot, ConfigBlob, ConfigBlobStore, LocalBlobBackend, RemoteBlob};
pub use collection::{CollectionSnapshot, Entry, OptimisticCollectionStore};
pub use notice::{Notice, NoticeLevel, Notifier};
