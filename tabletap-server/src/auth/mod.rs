//! Authentication Module
//!
//! JWT bearer authentication, the admin-status cache, and the axum
//! middleware that ties them to the request pipeline.

pub mod admin_cache;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use admin_cache::AdminCache;
pub use extractor::AdminStaff;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

/// Authenticated user extracted from a validated token
///
/// Injected into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}
