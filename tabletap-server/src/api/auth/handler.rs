//! Authentication Handlers
//!
//! Login, registration, and sign-out.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Authenticates staff credentials and returns a JWT. The error message is
/// uniform for unknown users and wrong passwords to prevent enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let account = repo
        .find_by_username(&req.username)
        .await
        .map_err(AppError::from)?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) => {
            if !a.is_active {
                return Err(AppError::new(ErrorCode::AccountDisabled));
            }
            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = account
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Account row has no id"))?;

    let token = state
        .jwt_service
        .generate_token(&user_id, &account.username)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    let is_admin = state
        .admin_cache
        .is_admin(&state.db, &user_id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(username = %account.username, "Login successful");
    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            username: account.username,
            is_admin,
        },
    }))
}

/// POST /api/auth/register
///
/// Creates a staff account with admin membership. The password confirmation
/// is checked before any database work.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    if req.username.trim().is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }
    if req.password.len() < 8 {
        return Err(AppError::validation("Password must be at least 8 characters"));
    }
    if req.password != req.password_confirm {
        return Err(AppError::new(ErrorCode::PasswordMismatch));
    }

    let repo = UserRepository::new(state.db.clone());
    let account = repo
        .create_admin(req.username.trim(), &req.password)
        .await
        .map_err(AppError::from)?;

    let user_id = account
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Account row has no id"))?;

    tracing::info!(username = %account.username, "Staff account registered");
    Ok(Json(UserInfo {
        id: user_id,
        username: account.username,
        is_admin: true,
    }))
}

/// GET /api/auth/me - identity behind the presented token
pub async fn me(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<UserInfo>> {
    let is_admin = state
        .admin_cache
        .is_admin(&state.db, &user.id)
        .await
        .map_err(AppError::from)?;

    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        is_admin,
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; sign-out invalidates the admin-status cache
/// wholesale so membership changes take effect on the next sign-in.
pub async fn logout(
    user: CurrentUser,
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.admin_cache.invalidate_all();
    tracing::info!(username = %user.username, "Signed out");
    Ok(Json(ApiResponse::ok()))
}
