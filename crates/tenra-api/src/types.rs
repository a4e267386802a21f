// Wire types for the platform API.
//
// Field names mirror the server's camelCase JSON. These are transport
// DTOs only -- `tenra-core` converts them into domain types and never
// exposes them to consumers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ── Identifiers ─────────────────────────────────────────────────────

/// Raw entity identifier as the server emits it.
///
/// Endpoints are inconsistent: numeric ids on some resources, opaque
/// strings on others. The untagged union accepts both; `tenra-core`
/// wraps it in its own `EntityId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

// ── Response envelope ───────────────────────────────────────────────

/// The `{success, data, error}` wrapper every API response uses.
///
/// `_totalPage` appears as an envelope-level sibling on a few paginated
/// endpoints; it is carried through but optional everywhere.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "_totalPage", default)]
    pub total_page: Option<u32>,
}

/// List payloads arrive in three shapes depending on the endpoint:
/// `{results: [...], total}`, `{data: [...]}`, or a bare array.
/// This is a server inconsistency; the client normalizes all of them
/// into [`Page`] so nothing above the wire layer ever branches on it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged {
        results: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Nested {
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

/// Normalized list result.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total item count across pages, when the endpoint reports one.
    pub total: Option<u64>,
}

impl<T> From<ListPayload<T>> for Page<T> {
    fn from(payload: ListPayload<T>) -> Self {
        match payload {
            ListPayload::Paged { results, total } => Self {
                items: results,
                total,
            },
            ListPayload::Nested { data } | ListPayload::Bare(data) => Self {
                items: data,
                total: None,
            },
        }
    }
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub phone_number: String,
    pub password: String,
}

/// Payload of a successful sign-in: the user object with the bearer
/// token and expiry hint embedded alongside it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInData {
    pub access_token: String,
    #[serde(default)]
    pub token_expired_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub user: UserDto,
}

// ── Categories ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPropertyDto {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<CategoryPropertyDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub properties: Vec<CategoryPropertyDto>,
}

/// Category updates send the full replacement document, matching the
/// server's PUT semantics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub properties: Vec<CategoryPropertyDto>,
}

// ── Products ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDto {
    #[serde(rename = "price")]
    pub amount: Decimal,
    #[serde(default)]
    pub display_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_sale_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Id,
    pub upc: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<PriceDto>,
    #[serde(default)]
    pub category: Option<Id>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub image_paths: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub upc: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_paths: Option<Vec<String>>,
}

// ── Store products ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProductDto {
    pub id: Id,
    pub product: ProductDto,
    #[serde(default)]
    pub inventory: i64,
    #[serde(default)]
    pub price: Option<PriceDto>,
}

/// Store-scoped price/inventory override, keyed by (store, upc) in the
/// URL rather than the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceDto>,
}

// ── Stores ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub support_delivery: Option<bool>,
    #[serde(default)]
    pub support_pickup: Option<bool>,
    #[serde(default)]
    pub open_time: Option<u8>,
    #[serde(default)]
    pub close_time: Option<u8>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Minimal store reference embedded in users and orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRefDto {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Users ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub store: Option<StoreRefDto>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<Id>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<Id>,
}

// ── Orders ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Id,
    pub status: String,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub store: Option<StoreRefDto>,
    #[serde(default)]
    pub display_total: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_payload_accepts_all_three_server_shapes() {
        let paged: ListPayload<i32> =
            serde_json::from_value(json!({"results": [1, 2], "total": 9})).unwrap();
        let nested: ListPayload<i32> = serde_json::from_value(json!({"data": [1, 2]})).unwrap();
        let bare: ListPayload<i32> = serde_json::from_value(json!([1, 2])).unwrap();

        let paged = Page::from(paged);
        assert_eq!(paged.items, vec![1, 2]);
        assert_eq!(paged.total, Some(9));
        assert_eq!(Page::from(nested).items, vec![1, 2]);
        assert_eq!(Page::from(bare).items, vec![1, 2]);
    }

    #[test]
    fn id_accepts_numbers_and_strings() {
        let numeric: Id = serde_json::from_value(json!(42)).unwrap();
        let opaque: Id = serde_json::from_value(json!("st-42")).unwrap();
        assert_eq!(numeric, Id::Int(42));
        assert_eq!(opaque, Id::Str("st-42".into()));
    }

    #[test]
    fn envelope_total_page_is_optional() {
        let env: Envelope<Vec<i32>> =
            serde_json::from_value(json!({"success": true, "data": [1], "_totalPage": 3})).unwrap();
        assert!(env.success);
        assert_eq!(env.total_page, Some(3));

        let env: Envelope<Vec<i32>> =
            serde_json::from_value(json!({"success": false, "error": "nope"})).unwrap();
        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("nope"));
    }

    #[test]
    fn sign_in_data_flattens_user_fields() {
        let data: SignInData = serde_json::from_value(json!({
            "accessToken": "tok-123",
            "id": 7,
            "username": "minh",
            "role": "admin",
        }))
        .unwrap();
        assert_eq!(data.access_token, "tok-123");
        assert_eq!(data.user.username, "minh");
        assert!(data.user.is_active);
    }

    #[test]
    fn update_requests_skip_unset_fields() {
        let body = serde_json::to_value(UpdateUserRequest {
            is_active: Some(false),
            store: Some(Id::Int(8)),
            ..UpdateUserRequest::default()
        })
        .unwrap();
        assert_eq!(body, json!({"isActive": false, "store": 8}));
    }
}
