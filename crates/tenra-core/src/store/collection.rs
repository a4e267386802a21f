// ── Generic reactive entity collection ──
//
// Lock-free keyed storage with push-based change notification via
// `watch` channels. The single write operation is a whole-collection
// replace: there is no per-item merge anywhere in this layer. Any
// single-item mutation happens server-side and surfaces only through a
// refetch-and-replace.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// A reactive collection for a single entity type.
///
/// Uses `DashMap` for O(1) concurrent lookups and a `watch` channel for
/// push-based change notification. The published snapshot preserves the
/// order of the last `replace_all` call, which is the server's listing
/// order.
pub(crate) struct EntityCollection<T: Send + Sync + 'static> {
    /// Primary storage: cache key -> entity. Keys are entity ids, or
    /// composite `"{store}:{upc}"` strings for store products.
    by_key: DashMap<String, Arc<T>>,

    /// Version counter, bumped on every replace.
    version: watch::Sender<u64>,

    /// Full snapshot in server listing order, rebuilt on every replace.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_key: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace the entire collection.
    ///
    /// The existing mapping is discarded wholesale -- no merge-by-id.
    /// One snapshot publish and one version bump per call, so observers
    /// never see a partially applied listing.
    pub(crate) fn replace_all(&self, items: Vec<(String, T)>) {
        self.by_key.clear();

        let mut ordered = Vec::with_capacity(items.len());
        for (key, entity) in items {
            let entity = Arc::new(entity);
            self.by_key.insert(key, Arc::clone(&entity));
            ordered.push(entity);
        }

        self.snapshot.send_modify(|snap| *snap = Arc::new(ordered));
        self.version.send_modify(|v| *v += 1);
    }

    /// Look up an entity by its cache key.
    pub(crate) fn get_by_key(&self, key: &str) -> Option<Arc<T>> {
        self.by_key.get(key).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// The replace counter. Tests use this to assert that a cached read
    /// did not touch the collection.
    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }
}
