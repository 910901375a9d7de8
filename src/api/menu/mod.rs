//! Menu API module
//!
//! The listing is public; everything else sits behind the admin layer.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", menu_routes())
}

fn menu_routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn(crate::auth::require_admin));

    Router::new()
        .route("/list", get(handler::list))
        .merge(admin)
}
