//! Order Model
//!
//! One cart submission tied to a session. Items are stored as a structured
//! list on the order row; serde at the storage/API boundary is the only
//! (de)serialization point for them.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status
///
/// Kitchen flow is pending → preparing → completed; served and cancelled are
/// operator-initiated side states reachable from any non-terminal state.
/// Completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether no further transition is allowed out of this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whitelist of allowed transitions; everything else is rejected before
    /// the store is touched.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if self.is_terminal() || target == *self {
            return false;
        }
        match target {
            OrderStatus::Pending => false,
            OrderStatus::Preparing => *self == OrderStatus::Pending,
            OrderStatus::Completed => matches!(self, OrderStatus::Preparing | OrderStatus::Served),
            // Admin side states, reachable from any non-terminal state
            OrderStatus::Served | OrderStatus::Cancelled => true,
        }
    }
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl OrderItem {
    /// price × quantity, rounded to 2 decimal places
    pub fn line_total(&self) -> Decimal {
        (self.price * Decimal::from(self.quantity)).round_dp(2)
    }
}

/// Sum of line totals, rounded to 2 decimal places
pub fn items_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(OrderItem::line_total)
        .sum::<Decimal>()
        .round_dp(2)
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Session this order belongs to
    #[serde(with = "serde_helpers::record_id")]
    pub session: RecordId,
    pub table_number: i32,
    pub order_items: Vec<OrderItem>,
    /// Always equals `items_total(&order_items)`
    pub total_amount: Decimal,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub status: OrderStatus,
    /// RFC3339 timestamp
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn item(price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            menu_item: ("menu_item", "x").into(),
            name: "item".to_string(),
            price: Decimal::from_f64(price).unwrap(),
            quantity,
            instructions: None,
        }
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let items = vec![item(10.0, 2), item(3.5, 3)];
        assert_eq!(items_total(&items), Decimal::from_f64(30.50).unwrap());
    }

    #[test]
    fn total_rounds_to_two_decimal_places() {
        let items = vec![item(0.333, 3)];
        assert_eq!(items_total(&items), Decimal::from_f64(1.00).unwrap());
    }

    #[test]
    fn kitchen_flow_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn side_states_reachable_from_non_terminal() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Served));
        assert!(OrderStatus::Served.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn terminal_states_reject_everything() {
        for target in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Served,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Completed.can_transition_to(target));
            assert!(!OrderStatus::Cancelled.can_transition_to(target));
        }
    }
}
