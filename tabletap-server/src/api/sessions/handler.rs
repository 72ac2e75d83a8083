//! Table Session API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::AdminStaff;
use crate::core::ServerState;
use crate::db::models::TableSession;
use crate::db::repository::SessionRepository;
use shared::{AppError, AppResult};

/// Open session request
#[derive(Debug, Deserialize, Validate)]
pub struct OpenSessionRequest {
    #[validate(range(min = 1, message = "table number must be positive"))]
    pub table_number: i32,
}

/// Close session request
#[derive(Debug, Deserialize)]
pub struct CloseSessionRequest {
    pub table_number: i32,
}

/// Session list filter
#[derive(Debug, Default, Deserialize)]
pub struct SessionListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// QR join link for a table's active session
#[derive(Debug, Serialize)]
pub struct QrLinkResponse {
    pub table_number: i32,
    pub session_id: String,
    pub url: String,
}

/// GET /api/sessions - list sessions (admin)
pub async fn list(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Query(query): Query<SessionListQuery>,
) -> AppResult<Json<Vec<TableSession>>> {
    let repo = SessionRepository::new(state.db.clone());
    let sessions = repo
        .find_all(query.active_only)
        .await
        .map_err(AppError::from)?;
    Ok(Json(sessions))
}

/// POST /api/sessions/open - open (or return) the active session for a table
///
/// Idempotent: scanning the same QR code twice lands in the same session.
pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<OpenSessionRequest>,
) -> AppResult<Json<TableSession>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = SessionRepository::new(state.db.clone());
    let session = repo.open(payload.table_number).await.map_err(AppError::from)?;
    Ok(Json(session))
}

/// POST /api/sessions/close - close the active session for a table (admin)
pub async fn close(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Json(payload): Json<CloseSessionRequest>,
) -> AppResult<Json<TableSession>> {
    let repo = SessionRepository::new(state.db.clone());
    let session = repo.close(payload.table_number).await.map_err(AppError::from)?;
    Ok(Json(session))
}

/// GET /api/sessions/table/:table_number - the table's active session, if any
pub async fn get_active(
    State(state): State<ServerState>,
    Path(table_number): Path<i32>,
) -> AppResult<Json<Option<TableSession>>> {
    let repo = SessionRepository::new(state.db.clone());
    let session = repo
        .find_active_by_table(table_number)
        .await
        .map_err(AppError::from)?;
    Ok(Json(session))
}

/// GET /api/sessions/table/:table_number/qr - QR join link (admin)
pub async fn qr_link(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(table_number): Path<i32>,
) -> AppResult<Json<QrLinkResponse>> {
    let repo = SessionRepository::new(state.db.clone());
    let session = repo
        .find_active_by_table(table_number)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(
                shared::ErrorCode::SessionNotFound,
                format!("No active session for table {}", table_number),
            )
        })?;

    let session_id = session
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Session row has no id"))?;
    let url = format!(
        "{}?table={}&session={}",
        state.config.public_base_url, table_number, session_id
    );

    Ok(Json(QrLinkResponse {
        table_number,
        session_id,
        url,
    }))
}
