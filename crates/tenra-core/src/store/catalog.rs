// ── Central entity store ──
//
// One ResourceCache per entity type plus the current-store selection
// and the auth slice. This is the only owner of canonical in-memory
// server data; everything else holds snapshots.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Category, Order, Product, Session, Store, StoreProduct, User};
use crate::resource::ResourceCache;

/// Process-wide normalized cache of last-known-good server data.
///
/// Thread-safe and lock-free on the read path; every collection is
/// mutated only by whole-collection replaces. Mutations are broadcast
/// to subscribers via `watch` channels.
pub struct CatalogStore {
    pub(crate) categories: ResourceCache<Category>,
    pub(crate) products: ResourceCache<Product>,
    pub(crate) store_products: ResourceCache<StoreProduct>,
    pub(crate) stores: ResourceCache<Store>,
    pub(crate) users: ResourceCache<User>,
    pub(crate) orders: ResourceCache<Order>,
    /// The store the operator is currently working against.
    current_store: watch::Sender<Option<Arc<Store>>>,
    /// Auth slice. Mirrored to the durable session file by the facade.
    session: watch::Sender<Option<Arc<Session>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        let (current_store, _) = watch::channel(None);
        let (session, _) = watch::channel(None);

        Self {
            categories: ResourceCache::new("categories"),
            products: ResourceCache::new("products"),
            store_products: ResourceCache::new("store-products"),
            stores: ResourceCache::new("stores"),
            users: ResourceCache::new("users"),
            orders: ResourceCache::new("orders"),
            current_store,
            session,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn categories_snapshot(&self) -> Arc<Vec<Arc<Category>>> {
        self.categories.snapshot()
    }

    pub fn products_snapshot(&self) -> Arc<Vec<Arc<Product>>> {
        self.products.snapshot()
    }

    pub fn store_products_snapshot(&self) -> Arc<Vec<Arc<StoreProduct>>> {
        self.store_products.snapshot()
    }

    pub fn stores_snapshot(&self) -> Arc<Vec<Arc<Store>>> {
        self.stores.snapshot()
    }

    pub fn users_snapshot(&self) -> Arc<Vec<Arc<User>>> {
        self.users.snapshot()
    }

    pub fn orders_snapshot(&self) -> Arc<Vec<Arc<Order>>> {
        self.orders.snapshot()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_categories(&self) -> watch::Receiver<Arc<Vec<Arc<Category>>>> {
        self.categories.subscribe()
    }

    pub fn subscribe_products(&self) -> watch::Receiver<Arc<Vec<Arc<Product>>>> {
        self.products.subscribe()
    }

    pub fn subscribe_store_products(&self) -> watch::Receiver<Arc<Vec<Arc<StoreProduct>>>> {
        self.store_products.subscribe()
    }

    pub fn subscribe_stores(&self) -> watch::Receiver<Arc<Vec<Arc<Store>>>> {
        self.stores.subscribe()
    }

    pub fn subscribe_users(&self) -> watch::Receiver<Arc<Vec<Arc<User>>>> {
        self.users.subscribe()
    }

    pub fn subscribe_orders(&self) -> watch::Receiver<Arc<Vec<Arc<Order>>>> {
        self.orders.subscribe()
    }

    // ── Loading flags (spinner display) ──────────────────────────────

    pub fn categories_loading(&self) -> watch::Receiver<bool> {
        self.categories.loading()
    }

    pub fn products_loading(&self) -> watch::Receiver<bool> {
        self.products.loading()
    }

    pub fn store_products_loading(&self) -> watch::Receiver<bool> {
        self.store_products.loading()
    }

    pub fn stores_loading(&self) -> watch::Receiver<bool> {
        self.stores.loading()
    }

    pub fn users_loading(&self) -> watch::Receiver<bool> {
        self.users.loading()
    }

    pub fn orders_loading(&self) -> watch::Receiver<bool> {
        self.orders.loading()
    }

    // ── Current store selection ──────────────────────────────────────

    pub fn current_store(&self) -> Option<Arc<Store>> {
        self.current_store.borrow().clone()
    }

    pub fn subscribe_current_store(&self) -> watch::Receiver<Option<Arc<Store>>> {
        self.current_store.subscribe()
    }

    pub(crate) fn set_current_store(&self, store: Option<Arc<Store>>) {
        let _ = self.current_store.send(store);
    }

    // ── Auth slice ───────────────────────────────────────────────────

    pub fn session(&self) -> Option<Arc<Session>> {
        self.session.borrow().clone()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.session.subscribe()
    }

    pub(crate) fn set_session(&self, session: Option<Arc<Session>>) {
        let _ = self.session.send(session);
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
