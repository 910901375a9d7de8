//! Feedback API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/feedback", feedback_routes())
}

fn feedback_routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/", get(handler::list_all))
        .route_layer(middleware::from_fn(crate::auth::require_admin));

    Router::new()
        .route("/", post(handler::submit))
        .route("/{id}", get(handler::view))
        .merge(admin)
}
