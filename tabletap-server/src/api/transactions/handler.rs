//! Checkout and Transaction API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::AdminStaff;
use crate::core::ServerState;
use crate::db::models::PaymentTransaction;
use crate::db::repository::TransactionRepository;
use shared::{AppError, AppResult, ErrorCode};

/// Checkout request
///
/// `expected_total` is the amount shown to the diner; when present the
/// server rejects the checkout if its own sum disagrees.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub session_id: String,
    #[validate(range(min = 1, message = "table number must be positive"))]
    pub table_number: i32,
    #[validate(length(min = 1, message = "payment method must not be empty"))]
    pub payment_method: String,
    #[serde(default)]
    pub expected_total: Option<rust_decimal::Decimal>,
}

/// POST /api/checkout - pay and close the session
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<PaymentTransaction>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = TransactionRepository::new(state.db.clone());
    let tx = repo
        .checkout(
            &payload.session_id,
            payload.table_number,
            &payload.payment_method,
            payload.expected_total,
        )
        .await
        .map_err(AppError::from)?;
    Ok(Json(tx))
}

/// GET /api/transactions/table/:table_number - payment history (admin)
pub async fn list_by_table(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(table_number): Path<i32>,
) -> AppResult<Json<Vec<PaymentTransaction>>> {
    let repo = TransactionRepository::new(state.db.clone());
    let txs = repo
        .find_by_table(table_number)
        .await
        .map_err(AppError::from)?;
    Ok(Json(txs))
}

/// GET /api/transactions/:id - fetch a single transaction (admin)
pub async fn get_by_id(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PaymentTransaction>> {
    let repo = TransactionRepository::new(state.db.clone());
    let tx = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::TransactionNotFound,
                format!("Transaction {} not found", id),
            )
        })?;
    Ok(Json(tx))
}
