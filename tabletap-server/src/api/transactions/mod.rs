//! Checkout and Transaction API Module
//!
//! Checkout is public (the diner pays from the cart page); transaction
//! history is admin-only.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/checkout", post(handler::checkout))
        .nest("/api/transactions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/table/{table_number}", get(handler::list_by_table))
        .route("/{id}", get(handler::get_by_id))
}
