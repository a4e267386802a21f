// ── Backoffice facade ──
//
// The main entry point for consumers. Owns the API client, the
// CatalogStore, and the session lifecycle; exposes per-entity fetch /
// mutate / search operations with uniform cache-invalidation semantics:
// every successful mutation triggers a forced refetch of its
// collection, and nothing is ever patched locally.
//
// Authorization is NOT enforced here -- consumers gate what they offer
// via the session's role, and the server performs its own check on
// every call.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use tracing::{debug, info};

use tenra_api::ApiClient;
use tenra_api::types::{
    CreateCategoryRequest, CreateProductRequest, CreateUserRequest, UpdateCategoryRequest,
    UpdateProductRequest, UpdateStoreProductRequest, UpdateUserRequest,
};

use crate::config::BackofficeConfig;
use crate::convert::store_product_from_dto;
use crate::error::CoreError;
use crate::model::category::validate_properties;
use crate::model::{
    Category, CategoryProperty, EntityId, Order, OrderStatus, Product, Session, Store, User,
    UserRole,
};
use crate::persist;
use crate::requests::{NewProduct, NewUser, ProductPatch, StoreProductPatch, UserPatch};
use crate::resource::{FetchOptions, FetchOutcome};
use crate::store::CatalogStore;

/// The back-office client: session, cache, and per-entity operations.
///
/// Cheaply cloneable via `Arc`; all state is shared.
#[derive(Clone)]
pub struct Backoffice {
    inner: Arc<BackofficeInner>,
}

struct BackofficeInner {
    config: BackofficeConfig,
    api: ApiClient,
    store: Arc<CatalogStore>,
    session_path: PathBuf,
    /// Store id of the last store-products fetch. A different store
    /// forces a refetch -- the cache guard must not serve another
    /// store's assortment.
    store_products_scope: Mutex<Option<EntityId>>,
    /// Same, for the per-store order listing.
    orders_scope: Mutex<Option<EntityId>>,
}

impl Backoffice {
    /// Create a new instance from configuration. Does not touch the
    /// network; call [`restore_session`](Self::restore_session) or
    /// [`sign_in`](Self::sign_in) before data operations.
    pub fn new(config: BackofficeConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.api_url.clone(), &config.transport())?;
        let session_path = config
            .session_file
            .clone()
            .unwrap_or_else(persist::default_session_path);

        Ok(Self {
            inner: Arc::new(BackofficeInner {
                config,
                api,
                store: Arc::new(CatalogStore::new()),
                session_path,
                store_products_scope: Mutex::new(None),
                orders_scope: Mutex::new(None),
            }),
        })
    }

    /// Access the underlying entity store.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.inner.store
    }

    pub fn config(&self) -> &BackofficeConfig {
        &self.inner.config
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate with (phone number, password).
    ///
    /// On success the bearer token is installed, the session lands in
    /// the store's auth slice, and the filtered auth fields are
    /// persisted to the durable session file.
    pub async fn sign_in(
        &self,
        phone_number: &str,
        password: &SecretString,
    ) -> Result<Arc<Session>, CoreError> {
        validate_phone_number(phone_number)?;

        let data = self
            .inner
            .api
            .sign_in(phone_number, password)
            .await
            .map_err(|e| match e {
                // A `success: false` sign-in is wrong credentials, not a
                // generic server rejection.
                tenra_api::Error::Rejected { message } => {
                    CoreError::AuthenticationFailed { message }
                }
                other => other.into(),
            })?;

        let session = Arc::new(Session::from(data));
        self.install_session(&session)?;
        info!(user = %session.user.username, role = %session.role(), "signed in");
        Ok(session)
    }

    /// Rehydrate the persisted session, if a live one exists.
    ///
    /// Sessions past their expiry hint are discarded rather than
    /// restored -- the server would reject the token anyway.
    pub fn restore_session(&self) -> Result<Option<Arc<Session>>, CoreError> {
        let Some(session) = persist::load(&self.session_path())? else {
            return Ok(None);
        };

        if session.is_expired() {
            debug!("persisted session is past its expiry hint, discarding");
            persist::remove(&self.session_path())?;
            return Ok(None);
        }

        let session = Arc::new(session);
        self.inner.api.set_token(session.access_token.clone());
        self.inner.store.set_session(Some(Arc::clone(&session)));
        debug!(user = %session.user.username, "session restored");
        Ok(Some(session))
    }

    /// Drop the token, the auth slice, and the session file.
    pub fn sign_out(&self) -> Result<(), CoreError> {
        self.inner.api.clear_token();
        self.inner.store.set_session(None);
        persist::remove(&self.session_path())?;
        info!("signed out");
        Ok(())
    }

    /// The current session, if signed in.
    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner.store.session()
    }

    /// Role == admin.
    pub fn is_authorized_for_admin(&self) -> bool {
        self.session().is_some_and(|s| s.is_authorized_for_admin())
    }

    /// Role == admin or manager.
    pub fn is_authorized_for_manager(&self) -> bool {
        self.session().is_some_and(|s| s.is_authorized_for_manager())
    }

    fn session_path(&self) -> PathBuf {
        self.inner.session_path.clone()
    }

    fn install_session(&self, session: &Arc<Session>) -> Result<(), CoreError> {
        self.inner.api.set_token(session.access_token.clone());
        persist::save(&self.session_path(), session)?;
        self.inner.store.set_session(Some(Arc::clone(session)));
        Ok(())
    }

    fn require_session(&self) -> Result<Arc<Session>, CoreError> {
        self.session().ok_or(CoreError::NotSignedIn)
    }

    // ── Categories ───────────────────────────────────────────────────

    /// Fetch the category listing (cache-aware; see [`FetchOptions`]).
    pub async fn fetch_categories(
        &self,
        options: FetchOptions,
    ) -> Result<FetchOutcome, CoreError> {
        self.require_session()?;
        let api = &self.inner.api;
        Ok(self
            .inner
            .store
            .categories
            .fetch_with(options, || async move {
                let page = api.list_categories().await?;
                Ok(page
                    .items
                    .into_iter()
                    .map(|dto| {
                        let category = Category::from(dto);
                        (category.id.to_string(), category)
                    })
                    .collect())
            })
            .await)
    }

    pub async fn create_category(
        &self,
        name: &str,
        properties: &[CategoryProperty],
    ) -> Result<(), CoreError> {
        require_non_empty(name, "category name")?;
        validate_properties(properties)?;

        let request = CreateCategoryRequest {
            name: name.to_owned(),
            properties: properties.iter().map(Into::into).collect(),
        };
        self.inner.api.create_category(&request).await?;
        self.fetch_categories(FetchOptions::refresh()).await?;
        Ok(())
    }

    pub async fn update_category(
        &self,
        id: &EntityId,
        name: &str,
        properties: &[CategoryProperty],
    ) -> Result<(), CoreError> {
        require_non_empty(name, "category name")?;
        validate_properties(properties)?;

        let request = UpdateCategoryRequest {
            name: name.to_owned(),
            properties: properties.iter().map(Into::into).collect(),
        };
        self.inner.api.update_category(&id.to_wire(), &request).await?;
        self.fetch_categories(FetchOptions::refresh()).await?;
        Ok(())
    }

    pub async fn delete_category(&self, id: &EntityId) -> Result<(), CoreError> {
        self.inner.api.delete_category(&id.to_wire()).await?;
        self.fetch_categories(FetchOptions::refresh()).await?;
        Ok(())
    }

    /// Client-side filter of the cached categories by name.
    pub fn search_categories(&self, query: &str) {
        self.inner.store.categories.search(query, |c| c.name.as_str());
    }

    // ── Products ─────────────────────────────────────────────────────

    pub async fn fetch_products(&self, options: FetchOptions) -> Result<FetchOutcome, CoreError> {
        self.require_session()?;
        let api = &self.inner.api;
        let page_size = self.inner.config.page_size;
        Ok(self
            .inner
            .store
            .products
            .fetch_with(options, || async move {
                let page = api.list_products(1, page_size).await?;
                Ok(page
                    .items
                    .into_iter()
                    .map(|dto| {
                        let product = Product::from(dto);
                        (product.id.to_string(), product)
                    })
                    .collect())
            })
            .await)
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<(), CoreError> {
        require_non_empty(&product.upc, "product upc")?;
        require_non_empty(&product.name, "product name")?;

        let request = CreateProductRequest {
            upc: product.upc.clone(),
            name: product.name.clone(),
            price: product.price.as_ref().map(Into::into),
            category: product.category.as_ref().map(EntityId::to_wire),
            full_description: product.description.clone(),
            image_paths: (!product.images.is_empty()).then(|| product.images.clone()),
        };
        self.inner.api.create_product(&request).await?;
        self.fetch_products(FetchOptions::refresh()).await?;
        Ok(())
    }

    pub async fn update_product(&self, id: &EntityId, patch: &ProductPatch) -> Result<(), CoreError> {
        let request = UpdateProductRequest {
            name: patch.name.clone(),
            price: patch.price.as_ref().map(Into::into),
            category: patch.category.as_ref().map(EntityId::to_wire),
            full_description: patch.description.clone(),
            image_paths: patch.images.clone(),
        };
        self.inner.api.update_product(&id.to_wire(), &request).await?;
        self.fetch_products(FetchOptions::refresh()).await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: &EntityId) -> Result<(), CoreError> {
        self.inner.api.delete_product(&id.to_wire()).await?;
        self.fetch_products(FetchOptions::refresh()).await?;
        Ok(())
    }

    /// Client-side filter of the cached catalog by product name.
    pub fn search_products(&self, query: &str) {
        self.inner.store.products.search(query, |p| p.name.as_str());
    }

    // ── Store products ───────────────────────────────────────────────

    /// Fetch one store's assortment. Switching to a different store
    /// bypasses the cache guard -- stale data from another store is
    /// never served.
    pub async fn fetch_store_products(
        &self,
        store_id: &EntityId,
        options: FetchOptions,
    ) -> Result<FetchOutcome, CoreError> {
        self.require_session()?;
        let options = rescope(&self.inner.store_products_scope, store_id, options);
        let api = &self.inner.api;
        Ok(self
            .inner
            .store
            .store_products
            .fetch_with(options, || async move {
                let page = api.list_store_products(&store_id.to_wire()).await?;
                Ok(page
                    .items
                    .into_iter()
                    .map(|dto| {
                        let sp = store_product_from_dto(dto, store_id);
                        (sp.key(), sp)
                    })
                    .collect())
            })
            .await)
    }

    pub async fn update_store_product(
        &self,
        store_id: &EntityId,
        upc: &str,
        patch: &StoreProductPatch,
    ) -> Result<(), CoreError> {
        require_non_empty(upc, "product upc")?;
        if let Some(inventory) = patch.inventory {
            if inventory < 0 {
                return Err(CoreError::ValidationFailed {
                    message: "inventory must not be negative".into(),
                });
            }
        }

        let request = UpdateStoreProductRequest {
            inventory: patch.inventory,
            price: patch.price.as_ref().map(Into::into),
        };
        self.inner
            .api
            .update_store_product(&store_id.to_wire(), upc, &request)
            .await?;
        self.fetch_store_products(store_id, FetchOptions::refresh()).await?;
        Ok(())
    }

    /// Client-side filter of the cached assortment by product name.
    pub fn search_store_products(&self, query: &str) {
        self.inner
            .store
            .store_products
            .search(query, |sp| sp.product.name.as_str());
    }

    // ── Stores ───────────────────────────────────────────────────────

    /// Fetch the store listing. On a fresh listing, the current-store
    /// selection is synced to the signed-in account's store binding if
    /// none is selected yet.
    pub async fn fetch_stores(&self, options: FetchOptions) -> Result<FetchOutcome, CoreError> {
        self.require_session()?;
        let api = &self.inner.api;
        let page_size = self.inner.config.page_size;
        let outcome = self
            .inner
            .store
            .stores
            .fetch_with(options, || async move {
                let page = api.list_stores(1, page_size).await?;
                Ok(page
                    .items
                    .into_iter()
                    .map(|dto| {
                        let store = Store::from(dto);
                        (store.id.to_string(), store)
                    })
                    .collect())
            })
            .await;

        if matches!(outcome, FetchOutcome::Fetched(_)) {
            self.sync_current_store();
        }
        Ok(outcome)
    }

    /// Select the store subsequent store-scoped screens work against.
    pub fn set_current_store(&self, id: &EntityId) -> Result<(), CoreError> {
        let store = self
            .inner
            .store
            .stores
            .get_by_key(&id.to_string())
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "store",
                identifier: id.to_string(),
            })?;
        self.inner.store.set_current_store(Some(store));
        Ok(())
    }

    /// Client-side filter of the cached stores by name.
    pub fn search_stores(&self, query: &str) {
        self.inner.store.stores.search(query, |s| s.name.as_str());
    }

    /// Default the current store to the account's own store binding.
    fn sync_current_store(&self) {
        if self.inner.store.current_store().is_some() {
            return;
        }
        let Some(session) = self.session() else { return };
        let Some(ref store_ref) = session.user.store else {
            return;
        };
        if let Some(store) = self.inner.store.stores.get_by_key(&store_ref.id.to_string()) {
            debug!(store = %store.name, "current store synced from account binding");
            self.inner.store.set_current_store(Some(store));
        }
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Fetch the user listing. Role-dependent endpoint: admins list the
    /// whole tenant, managers their own store's staff.
    pub async fn fetch_users(&self, options: FetchOptions) -> Result<FetchOutcome, CoreError> {
        let session = self.require_session()?;
        let api = &self.inner.api;

        let store_id = if session.is_authorized_for_admin() {
            None
        } else {
            let store_ref = session.user.store.as_ref().ok_or_else(|| CoreError::NoStoreBound {
                username: session.user.username.clone(),
            })?;
            Some(store_ref.id.to_wire())
        };

        Ok(self
            .inner
            .store
            .users
            .fetch_with(options, || async move {
                let page = match store_id {
                    None => api.list_tenant_users().await?,
                    Some(ref sid) => api.list_store_staff(sid).await?,
                };
                Ok(page
                    .items
                    .into_iter()
                    .map(|dto| {
                        let user = User::from(dto);
                        (user.id.to_string(), user)
                    })
                    .collect())
            })
            .await)
    }

    /// Create a staff or manager account. Admin accounts cannot be
    /// created through the back office.
    pub async fn create_user(&self, role: UserRole, user: &NewUser) -> Result<(), CoreError> {
        if role == UserRole::Admin {
            return Err(CoreError::ValidationFailed {
                message: "admin accounts cannot be created from the back office".into(),
            });
        }
        require_non_empty(&user.username, "username")?;
        validate_phone_number(&user.phone_number)?;
        if role == UserRole::Staff && user.store.is_none() {
            return Err(CoreError::ValidationFailed {
                message: "staff accounts must be bound to a store".into(),
            });
        }

        let request = CreateUserRequest {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            password: secrecy::ExposeSecret::expose_secret(&user.password).to_owned(),
            store: user.store.as_ref().map(EntityId::to_wire),
        };
        match role {
            UserRole::Staff => self.inner.api.create_staff(&request).await?,
            UserRole::Manager => self.inner.api.create_manager(&request).await?,
            UserRole::Admin => unreachable!("rejected above"),
        }
        self.fetch_users(FetchOptions::refresh()).await?;
        Ok(())
    }

    pub async fn update_user(&self, id: &EntityId, patch: &UserPatch) -> Result<(), CoreError> {
        let request = UpdateUserRequest {
            first_name: patch.first_name.clone(),
            last_name: patch.last_name.clone(),
            email: patch.email.clone(),
            is_active: patch.is_active,
            store: patch.store.as_ref().map(EntityId::to_wire),
        };
        self.inner.api.update_user(&id.to_wire(), &request).await?;
        self.fetch_users(FetchOptions::refresh()).await?;
        Ok(())
    }

    /// Re-enable a deactivated account.
    pub async fn activate_user(&self, id: &EntityId) -> Result<(), CoreError> {
        self.update_user(
            id,
            &UserPatch {
                is_active: Some(true),
                ..UserPatch::default()
            },
        )
        .await
    }

    /// Disable an account without deleting it.
    pub async fn deactivate_user(&self, id: &EntityId) -> Result<(), CoreError> {
        self.update_user(
            id,
            &UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
        )
        .await
    }

    /// Client-side filter of the cached users by username.
    pub fn search_users(&self, query: &str) {
        self.inner.store.users.search(query, |u| u.username.as_str());
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// Fetch one store's orders. Same scope handling as store products.
    pub async fn fetch_orders(
        &self,
        store_id: &EntityId,
        options: FetchOptions,
    ) -> Result<FetchOutcome, CoreError> {
        self.require_session()?;
        let options = rescope(&self.inner.orders_scope, store_id, options);
        let api = &self.inner.api;
        Ok(self
            .inner
            .store
            .orders
            .fetch_with(options, || async move {
                let page = api.list_store_orders(&store_id.to_wire()).await?;
                Ok(page
                    .items
                    .into_iter()
                    .map(|dto| {
                        let order = Order::from(dto);
                        (order.id.to_string(), order)
                    })
                    .collect())
            })
            .await)
    }

    /// Advance an order to the next status in the chain. Returns the
    /// status the order was moved to.
    pub async fn advance_order(&self, id: &EntityId) -> Result<OrderStatus, CoreError> {
        let order = self
            .inner
            .store
            .orders
            .get_by_key(&id.to_string())
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "order",
                identifier: id.to_string(),
            })?;

        let next = order.status.next().ok_or_else(|| CoreError::ValidationFailed {
            message: format!("order is already {} and cannot be advanced", order.status),
        })?;

        self.inner
            .api
            .update_order_status(&id.to_wire(), &next.to_string())
            .await?;

        let scope = self.inner.orders_scope.lock().expect("scope lock poisoned").clone();
        if let Some(store_id) = scope {
            self.fetch_orders(&store_id, FetchOptions::refresh()).await?;
        }
        Ok(next)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Force a cache override when the requested scope (store) differs from
/// the one the collection currently holds.
fn rescope(
    scope: &Mutex<Option<EntityId>>,
    store_id: &EntityId,
    mut options: FetchOptions,
) -> FetchOptions {
    let mut guard = scope.lock().expect("scope lock poisoned");
    if guard.as_ref() != Some(store_id) {
        options.override_cache = true;
        *guard = Some(store_id.clone());
    }
    options
}

fn require_non_empty(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: format!("{field} must not be empty"),
        });
    }
    Ok(())
}

/// Phone numbers: digits with an optional leading `+`, at least 8 long.
fn validate_phone_number(phone: &str) -> Result<(), CoreError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() >= 8 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("invalid phone number: {phone}"),
        })
    }
}
