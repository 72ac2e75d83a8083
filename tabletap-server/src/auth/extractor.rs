//! Auth Extractors
//!
//! Handler-level extractors for the authenticated user and for admin
//! authorization.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use shared::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already extracted by the auth middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => return Err(AppError::unauthorized()),
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Token validation failed");
                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

/// Admin authorization extractor
///
/// Wraps [`CurrentUser`] and additionally requires an admin-membership
/// entry, resolved through the admin-status cache so the store is consulted
/// at most once per user id between sign-outs.
#[derive(Debug, Clone)]
pub struct AdminStaff(pub CurrentUser);

impl FromRequestParts<ServerState> for AdminStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        let is_admin = state
            .admin_cache
            .is_admin(&state.db, &user.id)
            .await
            .map_err(AppError::from)?;

        if !is_admin {
            tracing::warn!(user = %user.username, uri = %parts.uri, "Admin route denied");
            return Err(AppError::admin_required());
        }

        Ok(AdminStaff(user))
    }
}
