//! API route modules
//!
//! One module per resource, each exposing `router() -> Router<ServerState>`
//! with its routes nested under `/api/<resource>`. [`router`] assembles the
//! full application: routes, authentication, CORS and tracing.

pub mod auth;
pub mod feedback;
pub mod health;
pub mod menu;
pub mod orders;
pub mod reservations;

use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// All resource routers, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(reservations::router())
        .merge(feedback::router())
}

/// The fully configured application
pub fn router(state: ServerState) -> Router {
    // Wide-open CORS for development tooling; production serves browsers
    // from its own origin and sends no CORS headers at all.
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    };

    build_router()
        // JWT authentication - injects CurrentUser, lets public paths through
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        // Unknown routes answer 404 without touching auth
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> (http::StatusCode, Json<serde_json::Value>) {
    (
        http::StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Route not found" })),
    )
}
