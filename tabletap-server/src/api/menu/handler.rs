//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::AdminStaff;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/menu - all items, ordered by category then name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(items))
}

/// GET /api/menu/categories - distinct category names
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let categories = repo.categories().await.map_err(AppError::from)?;
    Ok(Json(categories))
}

/// GET /api/menu/:id - fetch a single item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", id),
            )
        })?;
    Ok(Json(item))
}

/// POST /api/menu - create an item (admin)
pub async fn create(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(payload).await.map_err(AppError::from)?;
    Ok(Json(item))
}

/// PUT /api/menu/:id - update an item (admin)
pub async fn update(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(Json(item))
}

/// DELETE /api/menu/:id - delete an item (admin)
pub async fn delete(
    _admin: AdminStaff,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let result = repo.delete(&id).await.map_err(AppError::from)?;
    Ok(Json(result))
}
