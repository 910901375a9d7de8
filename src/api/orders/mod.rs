//! Orders API module
//!
//! `/all` and `/update/{id}` are admin-only; item mutations and delete
//! rely on the owner-or-admin guard inside the service instead of a
//! route layer, since ownership is per record, not per role.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/all", get(handler::list_all))
        .route("/update/{id}", patch(handler::update_status))
        .route_layer(middleware::from_fn(crate::auth::require_admin));

    Router::new()
        .route("/create", post(handler::create))
        .route("/user", get(handler::list_own))
        .route(
            "/{id}/items",
            post(handler::add_item).delete(handler::remove_item),
        )
        .route("/{id}", delete(handler::delete))
        .merge(admin)
}
