//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::AdminStaff;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::DiningTableRepository;
use shared::{AppError, AppResult};

/// GET /api/tables - list all tables
pub async fn list(
    _admin: AdminStaff,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - fetch a single table
pub async fn get_by_id(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Table {}", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - create a table
pub async fn create(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(payload).await.map_err(AppError::from)?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - update a table
pub async fn update(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - delete a table
pub async fn delete(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let result = repo.delete(&id).await.map_err(AppError::from)?;
    Ok(Json(result))
}
