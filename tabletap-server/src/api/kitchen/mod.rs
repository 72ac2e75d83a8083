//! Kitchen Board API Module
//!
//! The kitchen view works off the open orders (pending and preparing),
//! oldest first so cooks see the queue in arrival order.

use axum::{Json, Router, extract::State, routing::get};

use crate::auth::AdminStaff;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use shared::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/kitchen/orders", get(list_open))
}

/// GET /api/kitchen/orders - open orders for the kitchen board (admin)
pub async fn list_open(
    _admin: AdminStaff,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_kitchen().await.map_err(AppError::from)?;
    Ok(Json(orders))
}
