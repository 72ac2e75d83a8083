//! Auth API Module
//!
//! Login and registration are public; `me` and `logout` require a token.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        .route("/me", get(handler::me))
        .route("/logout", post(handler::logout))
}
