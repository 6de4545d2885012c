// ── Reactive collection streams ──
//
// Subscription types for consuming collection changes from a store.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use realty_api::Resource;

use crate::filter::{FilterSpec, Filterable};
use crate::store::CollectionSnapshot;

/// A subscription to one store's collection.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed`](Self::changed) or by converting to a `Stream`.
pub struct CollectionStream<T: Resource> {
    current: CollectionSnapshot<T>,
    receiver: watch::Receiver<CollectionSnapshot<T>>,
}

impl<T: Resource> CollectionStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<CollectionSnapshot<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &CollectionSnapshot<T> {
        &self.current
    }

    /// The latest snapshot (may have changed since creation).
    pub fn latest(&self) -> CollectionSnapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change. `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<CollectionSnapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Current items narrowed by `spec`.
    pub fn visible(&self, spec: &FilterSpec) -> Vec<Arc<T>>
    where
        T: Filterable,
    {
        spec.apply(&self.current.items())
    }

    pub fn into_stream(self) -> CollectionWatchStream<T> {
        CollectionWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding a snapshot each time the collection changes.
pub struct CollectionWatchStream<T: Resource> {
    inner: WatchStream<CollectionSnapshot<T>>,
}

impl<T: Resource> Stream for CollectionWatchStream<T> {
    type Item = CollectionSnapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
