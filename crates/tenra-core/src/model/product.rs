// ── Product and store-product domain types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A price with its server-rendered display string and optional sale
/// markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: Decimal,
    /// Server-formatted display string (e.g. `"45.000đ"`). Falls back
    /// to the raw amount when the server omitted it.
    pub display: String,
    #[serde(default)]
    pub sale_amount: Option<Decimal>,
    #[serde(default)]
    pub sale_display: Option<String>,
}

impl Price {
    /// The price the customer actually pays: sale price when one is set.
    pub fn effective_amount(&self) -> Decimal {
        self.sale_amount.unwrap_or(self.amount)
    }
}

/// A catalog product owned by the tenant.
///
/// `upc` is the unique business code; uniqueness within the tenant's
/// catalog is enforced server-side and assumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub upc: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub category: Option<EntityId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A product as stocked at one store: inventory count plus an optional
/// store-scoped price override. Keyed by (store id, product upc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProduct {
    pub id: EntityId,
    pub store_id: EntityId,
    pub product: Product,
    pub inventory: i64,
    #[serde(default)]
    pub price_override: Option<Price>,
}

impl StoreProduct {
    /// Composite cache key: `(store id, product upc)`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.store_id, self.product.upc)
    }

    /// The store-scoped price when one exists, else the catalog price.
    pub fn effective_price(&self) -> Option<&Price> {
        self.price_override.as_ref().or(self.product.price.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_price_wins_when_present() {
        let price = Price {
            amount: Decimal::new(45_000, 0),
            display: "45.000đ".into(),
            sale_amount: Some(Decimal::new(39_000, 0)),
            sale_display: Some("39.000đ".into()),
        };
        assert_eq!(price.effective_amount(), Decimal::new(39_000, 0));
    }

    #[test]
    fn store_product_key_is_store_and_upc() {
        let sp = StoreProduct {
            id: EntityId::Int(1),
            store_id: EntityId::Int(8),
            product: Product {
                id: EntityId::Int(10),
                upc: "8900001".into(),
                name: "Trà sữa".into(),
                price: None,
                category: None,
                description: None,
                images: Vec::new(),
                created_at: None,
                updated_at: None,
            },
            inventory: 12,
            price_override: None,
        };
        assert_eq!(sp.key(), "8:8900001");
    }
}
