// ── Generic resource cache ──
//
// One parametrized fetch/cache/search unit, instantiated per entity
// type by the CatalogStore. Uniform semantics across every resource:
//
// - fetch: serve from cache while non-empty unless explicitly
//   overridden (no TTL -- invalidation is mutation-driven or explicit);
// - a rejected read (`success: false`) replaces the collection with the
//   empty list, a transport failure leaves stale data in place;
// - search: client-side filter over the last full fetch, written back
//   into the collection as the active listing until the next fetch.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::store::collection::EntityCollection;

/// Options for a cached fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Bypass the non-empty-cache guard and always hit the network.
    pub override_cache: bool,
    /// Raise the resource's loading flag for the duration of the call.
    /// Display-only; never affects caching.
    pub with_loading: bool,
}

impl FetchOptions {
    /// Forced refresh, no loading flag -- used after mutations.
    pub fn refresh() -> Self {
        Self {
            override_cache: true,
            with_loading: false,
        }
    }
}

/// How a fetch concluded. Failures are values, not errors: no network
/// failure crosses the resource boundary as an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from the non-empty cache; no network call issued.
    Cached,
    /// Network call succeeded; collection replaced with this many items.
    Fetched(usize),
    /// Server returned `success: false`; collection replaced with the
    /// empty list.
    Rejected,
    /// Transport failure; cached data left untouched (stale view).
    TransportFailed,
}

/// Per-entity cache unit: the canonical collection, the last full fetch
/// (search source), and the loading flag.
pub(crate) struct ResourceCache<T: Send + Sync + 'static> {
    name: &'static str,
    collection: EntityCollection<T>,
    /// The last full fetch result, kept as the search source so a
    /// narrowing search (which replaces the active collection) can be
    /// undone by `search("")` without a network call.
    full: std::sync::RwLock<Vec<(String, T)>>,
    loading: watch::Sender<bool>,
}

impl<T: Clone + Send + Sync + 'static> ResourceCache<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            name,
            collection: EntityCollection::new(),
            full: std::sync::RwLock::new(Vec::new()),
            loading,
        }
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Fetch-or-use-cache with the uniform failure semantics above.
    ///
    /// `fetcher` runs at most once. There is deliberately no in-flight
    /// guard or de-duplication: concurrent calls issue concurrent
    /// requests and the last response to land wins the final replace.
    pub(crate) async fn fetch_with<F, Fut>(&self, options: FetchOptions, fetcher: F) -> FetchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<(String, T)>, tenra_api::Error>>,
    {
        if !options.override_cache && !self.collection.is_empty() {
            debug!(resource = self.name, "serving from cache");
            return FetchOutcome::Cached;
        }

        let _loading = options.with_loading.then(|| LoadingGuard::raise(&self.loading));

        match fetcher().await {
            Ok(items) => {
                let count = items.len();
                *self.full.write().expect("search source lock poisoned") = items.clone();
                self.collection.replace_all(items);
                debug!(resource = self.name, count, "collection replaced");
                FetchOutcome::Fetched(count)
            }
            Err(e) if e.is_rejected() => {
                warn!(resource = self.name, error = %e, "fetch rejected, emptying collection");
                self.full.write().expect("search source lock poisoned").clear();
                self.collection.replace_all(Vec::new());
                FetchOutcome::Rejected
            }
            Err(e) => {
                warn!(resource = self.name, error = %e, "fetch failed, keeping cached data");
                FetchOutcome::TransportFailed
            }
        }
    }

    // ── Search ───────────────────────────────────────────────────────

    /// Case-insensitive substring filter over the last full fetch,
    /// matched on the display field selected by `field`. Writes the
    /// subset into the collection -- display-only and destructive until
    /// the next fetch. The empty query restores the full listing.
    pub(crate) fn search(&self, query: &str, field: impl Fn(&T) -> &str) {
        let full = self.full.read().expect("search source lock poisoned");

        if query.is_empty() {
            self.collection.replace_all(full.clone());
            return;
        }

        let needle = query.to_lowercase();
        let filtered: Vec<(String, T)> = full
            .iter()
            .filter(|(_, item)| field(item).to_lowercase().contains(&needle))
            .cloned()
            .collect();

        debug!(resource = self.name, query, matches = filtered.len(), "search applied");
        self.collection.replace_all(filtered);
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.collection.snapshot()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.collection.subscribe()
    }

    pub(crate) fn get_by_key(&self, key: &str) -> Option<Arc<T>> {
        self.collection.get_by_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.collection.len()
    }

    pub(crate) fn version(&self) -> u64 {
        self.collection.version()
    }

    /// Subscribe to the loading flag (spinner display).
    pub(crate) fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}

/// RAII loading flag: raised on creation, lowered on drop so every exit
/// path (including the swallowed failure ones) resets it.
struct LoadingGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a watch::Sender<bool>) -> Self {
        let _ = flag.send(true);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let _ = self.flag.send(false);
    }
}
