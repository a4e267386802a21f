// ── Order domain type ──
//
// The order lifecycle is owned by the server. Client-side the status
// list is a static lookup table: display label plus the single next
// transition a back-office operator may request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;
use super::store::StoreRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Received,
    Processing,
    Shipping,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Operator-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Awaiting confirmation",
            Self::Received => "Order received",
            Self::Processing => "Processing",
            Self::Shipping => "Out for delivery",
            Self::Delivered => "Delivered",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// The next status an operator may advance this order to.
    /// Terminal states (`Completed`, `Cancelled`) have none.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Received),
            Self::Received => Some(Self::Processing),
            Self::Processing => Some(Self::Shipping),
            Self::Shipping => Some(Self::Delivered),
            Self::Delivered => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }
}

/// Payment state reported by the server (uppercase on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Overdue,
}

/// A customer order as listed for one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub store: Option<StoreRef>,
    /// Server-formatted order total.
    #[serde(default)]
    pub display_total: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_chain_ends_at_completed() {
        let mut status = OrderStatus::Pending;
        let mut hops = 0;
        while let Some(next) = status.next() {
            status = next;
            hops += 1;
        }
        assert_eq!(status, OrderStatus::Completed);
        assert_eq!(hops, 5);
    }

    #[test]
    fn terminal_states_have_no_transition() {
        assert_eq!(OrderStatus::Completed.next(), None);
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }

    #[test]
    fn every_status_has_a_label() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Received,
            OrderStatus::Processing,
            OrderStatus::Shipping,
            OrderStatus::Delivered,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert!(!status.label().is_empty());
        }
    }

    #[test]
    fn payment_status_parses_wire_casing() {
        assert_eq!(
            "OVERDUE".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Overdue
        );
    }
}
