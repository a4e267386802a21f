//! Cached data layer between `tenra-api` and UI consumers.
//!
//! This crate owns the domain model, the normalized entity cache, and
//! the per-entity resource services for the Tenra back office:
//!
//! - **[`Backoffice`]** -- Central facade managing session lifecycle
//!   ([`sign_in`](Backoffice::sign_in) /
//!   [`restore_session`](Backoffice::restore_session)) and the uniform
//!   fetch / mutate / search contract per entity. Every successful
//!   mutation resynchronizes its collection with a forced refetch;
//!   nothing is ever patched locally.
//!
//! - **[`CatalogStore`]** -- Process-wide normalized cache built on
//!   whole-collection-replace semantics (`DashMap` + `tokio::sync::watch`
//!   snapshots). The only owner of canonical server data.
//!
//! - **[`FetchOptions`] / [`FetchOutcome`]** -- The cache policy surface:
//!   stale-while-valid-forever, invalidated only by mutations or an
//!   explicit override; read failures are outcome values, never
//!   exceptions.
//!
//! - **Domain model** ([`model`]) -- Canonical types (`Category`,
//!   `Product`, `StoreProduct`, `Store`, `User`, `Order`, `Session`)
//!   with [`EntityId`] covering the server's mixed integer/string ids.

pub mod backoffice;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod requests;
pub mod resource;
pub mod store;

mod persist;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backoffice::Backoffice;
pub use config::{BackofficeConfig, TlsVerification};
pub use error::CoreError;
pub use requests::{NewProduct, NewUser, ProductPatch, StoreProductPatch, UserPatch};
pub use resource::{FetchOptions, FetchOutcome};
pub use store::CatalogStore;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Category,
    CategoryProperty,
    EntityId,
    Order,
    OrderStatus,
    PaymentStatus,
    Price,
    Product,
    PropertyType,
    Session,
    Store,
    StoreProduct,
    StoreRef,
    User,
    UserRole,
};
