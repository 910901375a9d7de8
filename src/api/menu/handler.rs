//! Menu handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppResult, ValidatedJson};

/// Public listing with optional filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.list(&query).await?;
    Ok(Json(items))
}

/// Create a menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(req).await?;
    tracing::info!(name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Partially update a menu item (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&id, req).await?;
    Ok(Json(item))
}

/// Delete a menu item (admin). Existing order lines keep their link and
/// simply fail pricing on the next mutation.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({
        "message": "Menu item deleted successfully",
        "id": id,
    })))
}
