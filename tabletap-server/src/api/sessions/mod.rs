//! Table Session API Module
//!
//! `open` and the active-session lookup are public (reached from the QR
//! entry page); listing, closing, and QR generation are admin routes.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sessions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/open", post(handler::open))
        .route("/close", post(handler::close))
        .route("/table/{table_number}", get(handler::get_active))
        .route("/table/{table_number}/qr", get(handler::qr_link))
}
