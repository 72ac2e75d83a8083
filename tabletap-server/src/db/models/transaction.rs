//! Payment Transaction Model

use super::order::Order;
use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Payment record closing out a session's accumulated orders
///
/// Created exactly once per checkout and never mutated afterwards.
/// `order_details` is an immutable snapshot of the session's orders at
/// checkout time; later edits to menu items cannot change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub session: RecordId,
    pub table_number: i32,
    pub total_amount: Decimal,
    pub payment_method: String,
    pub order_details: Vec<Order>,
    /// RFC3339 timestamp
    pub created_at: String,
}
