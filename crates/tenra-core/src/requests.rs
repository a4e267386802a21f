// ── Typed request structs for facade operations ──
//
// Mutation inputs are strongly typed here; the facade converts them to
// wire bodies after client-side validation.

use secrecy::SecretString;

use crate::model::{EntityId, Price};

/// Input for adding a product to the tenant catalog.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub upc: String,
    pub name: String,
    pub price: Option<Price>,
    pub category: Option<EntityId>,
    pub description: Option<String>,
    pub images: Vec<String>,
}

/// Partial catalog-product update; unset fields are left unchanged
/// server-side.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub category: Option<EntityId>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Store-scoped inventory/price update for one assortment entry.
#[derive(Debug, Clone, Default)]
pub struct StoreProductPatch {
    pub inventory: Option<i64>,
    pub price: Option<Price>,
}

/// Input for creating a staff or manager account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub password: SecretString,
    /// The store the account works at. Required for staff.
    pub store: Option<EntityId>,
}

/// Partial account update.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub store: Option<EntityId>,
}
