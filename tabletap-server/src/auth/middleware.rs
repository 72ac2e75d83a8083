//! Authentication Middleware
//!
//! Axum middleware for JWT authentication and admin authorization.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use shared::AppError;

/// Routes reachable without a token: everything a diner uses after scanning
/// a table QR code, plus health and the login/register endpoints.
fn is_public_route(method: &Method, path: &str) -> bool {
    match *method {
        Method::GET => {
            path == "/api/health"
                || path.starts_with("/api/menu")
                || (path.starts_with("/api/sessions/table/") && !path.ends_with("/qr"))
                || path == "/api/orders"
                || (path.starts_with("/api/orders/") && path != "/api/orders/")
        }
        Method::POST => {
            path == "/api/auth/login"
                || path == "/api/auth/register"
                || path == "/api/sessions/open"
                || path == "/api/orders"
                || path == "/api/checkout"
        }
        _ => false,
    }
}

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// injects [`CurrentUser`] into request extensions. Public diner routes,
/// CORS preflight, and non-API paths skip authentication.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through (plain 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diner_routes_are_public() {
        assert!(is_public_route(&Method::GET, "/api/menu"));
        assert!(is_public_route(&Method::GET, "/api/menu/categories"));
        assert!(is_public_route(&Method::POST, "/api/sessions/open"));
        assert!(is_public_route(&Method::GET, "/api/sessions/table/5"));
        assert!(is_public_route(&Method::POST, "/api/orders"));
        assert!(is_public_route(&Method::POST, "/api/checkout"));
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
    }

    #[test]
    fn admin_routes_are_not_public() {
        assert!(!is_public_route(&Method::POST, "/api/tables"));
        assert!(!is_public_route(&Method::GET, "/api/sessions"));
        assert!(!is_public_route(&Method::GET, "/api/sessions/table/5/qr"));
        assert!(!is_public_route(&Method::POST, "/api/sessions/close"));
        assert!(!is_public_route(&Method::PUT, "/api/orders/food_order:1/status"));
        assert!(!is_public_route(&Method::POST, "/api/menu"));
        assert!(!is_public_route(&Method::GET, "/api/kitchen/orders"));
        assert!(!is_public_route(&Method::GET, "/api/transactions/table/5"));
    }
}
