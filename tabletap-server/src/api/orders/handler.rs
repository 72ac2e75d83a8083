//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::AdminStaff;
use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, OrderStatus};
use crate::db::repository::OrderRepository;
use shared::{AppError, AppResult, ErrorCode};

/// Create order request: one cart submission becomes one order row
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub session_id: String,
    #[validate(range(min = 1, message = "table number must be positive"))]
    pub table_number: i32,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// Status transition request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Item replacement request (admin edit)
#[derive(Debug, Deserialize)]
pub struct ReplaceItemsRequest {
    pub order_items: Vec<OrderItem>,
}

/// Session filter for order listing
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub session: String,
}

/// POST /api/orders - submit a cart as a single order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    // Empty carts are rejected here, before any store access
    payload
        .validate()
        .map_err(|e| AppError::with_message(ErrorCode::EmptyOrder, e.to_string()))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(
            &payload.session_id,
            payload.table_number,
            payload.order_items,
            payload.special_instructions,
        )
        .await
        .map_err(AppError::from)?;
    Ok(Json(order))
}

/// GET /api/orders?session=… - a session's orders, newest first
pub async fn list_by_session(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_by_session(&query.session)
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - fetch a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - transition an order's status (admin)
///
/// Unknown status strings fail deserialization; known-but-disallowed
/// transitions are rejected by the whitelist before the store is touched.
pub async fn update_status(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .update_status(&id, payload.status)
        .await
        .map_err(AppError::from)?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/items - replace an order's items (admin)
///
/// Replacing with an empty list deletes the order row; the response is the
/// updated order or null when the row was removed.
pub async fn replace_items(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReplaceItemsRequest>,
) -> AppResult<Json<Option<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .replace_items(&id, payload.order_items)
        .await
        .map_err(AppError::from)?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id - delete an order (admin)
pub async fn delete(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    let result = repo.delete(&id).await.map_err(AppError::from)?;
    Ok(Json(result))
}
