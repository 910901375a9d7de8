//! Reservations API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", reservation_routes())
}

fn reservation_routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/all", get(handler::list_all))
        .route("/update/{id}", patch(handler::update_status))
        .route_layer(middleware::from_fn(crate::auth::require_admin));

    Router::new()
        .route("/", post(handler::create))
        .route("/user", get(handler::list_own))
        .merge(admin)
}
