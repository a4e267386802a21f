//! Async client for the Tenra retail platform REST API.
//!
//! Wraps `reqwest` with the platform's conventions: bearer-token auth,
//! the `{success, data, error}` response envelope, and normalization of
//! the three list-payload shapes different endpoints emit. All methods
//! return unwrapped `data` payloads -- the envelope is stripped before
//! the caller sees it.
//!
//! Endpoint methods are implemented as inherent methods on [`ApiClient`],
//! split across one module per resource (categories, products, stores,
//! users, orders). `tenra-core` converts the wire DTOs in [`types`] into
//! domain types and owns caching; this crate is transport only.

pub mod auth;
pub mod categories;
pub mod client;
pub mod error;
pub mod orders;
pub mod products;
pub mod stores;
pub mod transport;
pub mod types;
pub mod users;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{Envelope, Page};
