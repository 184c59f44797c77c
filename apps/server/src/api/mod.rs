//! HTTP API assembly.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::auth::auth_middleware;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

/// Build the full router: the versioned API behind authentication, plus
/// the unauthenticated service endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.server.max_request_body_size;

    let api = routes::api_routes(Arc::clone(&state)).layer(
        axum_middleware::from_fn_with_state(Arc::clone(&state), auth_middleware),
    );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/favicon.ico", get(favicon))
        .nest("/api/v1", api)
        .with_state(Arc::clone(&state))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&state.config))
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "service": "kinoteka",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
