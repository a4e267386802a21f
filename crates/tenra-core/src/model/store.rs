// ── Store domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A physical store owned by the tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: EntityId,
    pub name: String,
    /// Short store code used on receipts and in staff tooling.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub support_delivery: bool,
    #[serde(default)]
    pub support_pickup: bool,
    /// Opening hour of day, 0-23.
    #[serde(default)]
    pub open_time: Option<u8>,
    /// Closing hour of day, 0-23.
    #[serde(default)]
    pub close_time: Option<u8>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Store {
    /// Whether the store is open at the given hour, when opening hours
    /// are known. Closing hour is exclusive.
    pub fn is_open_at(&self, hour: u8) -> Option<bool> {
        let (open, close) = (self.open_time?, self.close_time?);
        Some(if open <= close {
            (open..close).contains(&hour)
        } else {
            // Overnight hours, e.g. 18..2.
            hour >= open || hour < close
        })
    }
}

/// Minimal store reference embedded in users and orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
}
