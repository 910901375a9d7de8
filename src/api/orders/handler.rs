//! Order handlers
//!
//! Thin layer over [`OrderService`]: extract the principal, validate the
//! payload, delegate.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderAddItem, OrderCreate, OrderRemoveItem, OrderStatusUpdate};
use crate::orders::OrderService;
use crate::utils::{AppResult, ValidatedJson};

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub order_type: Option<String>,
}

/// Create an order for the current user
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(req): ValidatedJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let service = OrderService::new(state.get_db());
    let order = service.create(&user, req).await?;
    tracing::info!(user_id = %user.id, total = order.total_price, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// Current user's orders, newest first
pub async fn list_own(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.get_db());
    let orders = service.list_for_customer(&user).await?;
    Ok(Json(orders))
}

/// All orders with optional filters (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.get_db());
    let orders = service
        .list_all(query.status.as_deref(), query.order_type.as_deref())
        .await?;
    Ok(Json(orders))
}

/// Set a new status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.get_db());
    let order = service.update_status(&id, &req.status).await?;
    tracing::info!(order_id = %id, status = %req.status, "Order status updated");
    Ok(Json(order))
}

/// Add a menu item to the order (owner or admin)
pub async fn add_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<OrderAddItem>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.get_db());
    let order = service.add_item(&user, &id, req).await?;
    Ok(Json(order))
}

/// Remove a menu item's line from the order (owner or admin)
pub async fn remove_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<OrderRemoveItem>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.get_db());
    let order = service.remove_item(&user, &id, req).await?;
    Ok(Json(order))
}

/// Delete an order (owner or admin)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let service = OrderService::new(state.get_db());
    service.delete(&user, &id).await?;
    tracing::info!(order_id = %id, user_id = %user.id, "Order deleted");
    Ok(Json(serde_json::json!({
        "message": "Order deleted successfully",
        "id": id,
    })))
}
