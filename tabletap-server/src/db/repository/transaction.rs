//! Payment Transaction Repository
//!
//! Checkout deactivates the session, writes the transaction, and releases
//! the table inside one database transaction. The session deactivation
//! doubles as the active-session guard: if it matches zero rows the block
//! aborts, so a payment can never be recorded against a closed session.

use super::{BaseRepository, OrderRepository, RepoError, RepoResult, SessionRepository};
use crate::db::models::{OrderStatus, PaymentTransaction, TableStatus};
use rust_decimal::Decimal;
use shared::ErrorCode;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
    sessions: SessionRepository,
    orders: OrderRepository,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            sessions: SessionRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    /// Check out a session: snapshot its orders, record the payment, close
    /// the session, and release the table, atomically.
    ///
    /// `expected_total` is the amount the client displayed to the diner;
    /// when given, it must equal the server-side sum.
    pub async fn checkout(
        &self,
        session_id: &str,
        table_number: i32,
        payment_method: &str,
        expected_total: Option<Decimal>,
    ) -> RepoResult<PaymentTransaction> {
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
        if session.table_number != table_number {
            return Err(RepoError::Business(
                ErrorCode::SessionTableMismatch,
                format!(
                    "Session belongs to table {}, not table {}",
                    session.table_number, table_number
                ),
            ));
        }

        let orders = self.orders.find_by_session(session_id).await?;
        if orders.is_empty() {
            return Err(RepoError::Business(
                ErrorCode::EmptyCheckout,
                format!("Session {} has no orders to check out", session_id),
            ));
        }

        // Session total: cancelled orders are not charged
        let total_amount: Decimal = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total_amount)
            .sum::<Decimal>()
            .round_dp(2);

        if let Some(expected) = expected_total
            && expected.round_dp(2) != total_amount
        {
            return Err(RepoError::Business(
                ErrorCode::TotalMismatch,
                format!(
                    "Expected total {} does not match session total {}",
                    expected, total_amount
                ),
            ));
        }

        let session_thing = session
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Session row has no id".to_string()))?;

        let tx = PaymentTransaction {
            id: None,
            session: session_thing.clone(),
            table_number,
            total_amount,
            payment_method: payment_method.to_string(),
            order_details: orders,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        // The session must still be active when the payment lands. Deactivating
        // it is the first statement of the transaction; matching zero rows
        // means a close won the race, and the THROW cancels the whole block so
        // no payment is recorded against a closed session.
        let result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 LET $closed = UPDATE $sess SET is_active = false, ended_at = $now WHERE is_active = true RETURN AFTER;
                 IF array::len($closed) = 0 { THROW 'session already closed' };
                 CREATE payment_transaction CONTENT $tx;
                 UPDATE dining_table SET status = $available WHERE table_number = $n;
                 COMMIT TRANSACTION;",
            )
            .bind(("tx", tx))
            .bind(("sess", session_thing))
            .bind(("now", chrono::Utc::now().to_rfc3339()))
            .bind(("available", TableStatus::Available))
            .bind(("n", table_number))
            .await?;
        let mut result = result;
        let errors = result.take_errors();
        if !errors.is_empty() {
            // A THROW lands on its own statement while the others report a
            // generic failed-transaction error, so scan every statement's
            // error rather than just the first.
            let msg = errors
                .into_values()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(if msg.contains("session already closed") {
                RepoError::Business(
                    ErrorCode::SessionClosed,
                    format!("Session {} has already been closed", session_id),
                )
            } else {
                RepoError::Database(msg)
            });
        }
        let created: Vec<PaymentTransaction> = result.take(2)?;
        let created = created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to record transaction".to_string()))?;

        tracing::info!(
            table_number,
            session = %session_id,
            total = %created.total_amount,
            method = %created.payment_method,
            "Checkout complete"
        );
        Ok(created)
    }

    /// Find transaction by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PaymentTransaction>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let tx: Option<PaymentTransaction> = self.base.db().select(thing).await?;
        Ok(tx)
    }

    /// All transactions for a table, newest first
    pub async fn find_by_table(&self, table_number: i32) -> RepoResult<Vec<PaymentTransaction>> {
        let txs: Vec<PaymentTransaction> = self
            .base
            .db()
            .query(
                "SELECT * FROM payment_transaction WHERE table_number = $n \
                 ORDER BY created_at DESC",
            )
            .bind(("n", table_number))
            .await?
            .take(0)?;
        Ok(txs)
    }
}
