//! Order Repository
//!
//! Orders are created whole (one cart submission, one row) with the total
//! computed server-side, and mutated only through the status whitelist or
//! item replacement. Replacing with an empty list deletes the row.

use super::{BaseRepository, RepoError, RepoResult, SessionRepository};
use crate::db::models::{items_total, Order, OrderItem, OrderStatus};
use shared::ErrorCode;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "food_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
    sessions: SessionRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            sessions: SessionRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    fn validate_items(items: &[OrderItem]) -> RepoResult<()> {
        if items.is_empty() {
            return Err(RepoError::Business(
                ErrorCode::EmptyOrder,
                "Order must contain at least one item".to_string(),
            ));
        }
        if let Some(bad) = items.iter().find(|i| i.quantity <= 0) {
            return Err(RepoError::Business(
                ErrorCode::InvalidQuantity,
                format!("Quantity {} for '{}' must be positive", bad.quantity, bad.name),
            ));
        }
        Ok(())
    }

    /// Create an order for an active session
    pub async fn create(
        &self,
        session_id: &str,
        table_number: i32,
        items: Vec<OrderItem>,
        special_instructions: Option<String>,
    ) -> RepoResult<Order> {
        Self::validate_items(&items)?;

        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| {
                RepoError::Business(
                    ErrorCode::SessionNotFound,
                    format!("Session {} not found", session_id),
                )
            })?;
        if !session.is_active {
            return Err(RepoError::Business(
                ErrorCode::SessionClosed,
                format!("Session {} is closed", session_id),
            ));
        }
        if session.table_number != table_number {
            return Err(RepoError::Business(
                ErrorCode::SessionTableMismatch,
                format!(
                    "Session belongs to table {}, not table {}",
                    session.table_number, table_number
                ),
            ));
        }

        let session_thing = session
            .id
            .ok_or_else(|| RepoError::Database("Session row has no id".to_string()))?;

        let order = Order {
            id: None,
            session: session_thing,
            table_number,
            total_amount: items_total(&items),
            order_items: items,
            special_instructions,
            status: OrderStatus::Pending,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// All orders for a session, newest first
    ///
    /// The session link is stored as a "table:id" string, so the filter
    /// binds the normalized string form.
    pub async fn find_by_session(&self, session_id: &str) -> RepoResult<Vec<Order>> {
        let session: RecordId = session_id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid session ID: {}", session_id)))?;
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM food_order WHERE session = $sess ORDER BY created_at DESC")
            .bind(("sess", session.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Kitchen board: pending and preparing orders, oldest first
    pub async fn find_kitchen(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM food_order WHERE status IN ['pending', 'preparing'] \
                 ORDER BY created_at ASC",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Transition an order's status
    ///
    /// The whitelist is checked against the current status before the store
    /// is touched; disallowed targets never reach the database.
    pub async fn update_status(&self, id: &str, new_status: OrderStatus) -> RepoResult<Order> {
        let order = self.find_by_id(id).await?.ok_or_else(|| {
            RepoError::Business(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;

        if !order.status.can_transition_to(new_status) {
            return Err(RepoError::Business(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move order from {:?} to {:?}", order.status, new_status),
            ));
        }

        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", new_status))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Replace an order's item list (admin edit)
    ///
    /// Recomputes the total; an empty replacement deletes the order row
    /// entirely and returns None.
    pub async fn replace_items(
        &self,
        id: &str,
        items: Vec<OrderItem>,
    ) -> RepoResult<Option<Order>> {
        let order = self.find_by_id(id).await?.ok_or_else(|| {
            RepoError::Business(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;

        if order.status.is_terminal() {
            return Err(RepoError::Business(
                ErrorCode::OrderFinalized,
                format!("Order {} can no longer be modified", id),
            ));
        }

        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        if items.is_empty() {
            self.base
                .db()
                .query("DELETE $thing")
                .bind(("thing", thing))
                .await?;
            tracing::info!(order = %id, "Last item removed, order deleted");
            return Ok(None);
        }

        if let Some(bad) = items.iter().find(|i| i.quantity <= 0) {
            return Err(RepoError::Business(
                ErrorCode::InvalidQuantity,
                format!("Quantity {} for '{}' must be positive", bad.quantity, bad.name),
            ));
        }

        let total = items_total(&items);
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET order_items = $items, total_amount = $total RETURN AFTER")
            .bind(("thing", thing))
            .bind(("items", items))
            .bind(("total", total))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
