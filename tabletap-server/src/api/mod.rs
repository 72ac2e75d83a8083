//! API Route Modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login, registration, session management
//! - [`tables`] - table management (admin)
//! - [`sessions`] - table session lifecycle
//! - [`orders`] - order submission and lifecycle
//! - [`kitchen`] - kitchen board (admin)
//! - [`menu`] - menu browsing and management
//! - [`transactions`] - checkout and payment history

pub mod auth;
pub mod health;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod sessions;
pub mod tables;
pub mod transactions;

use axum::Router;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(tables::router())
        .merge(sessions::router())
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(menu::router())
        .merge(transactions::router())
}
