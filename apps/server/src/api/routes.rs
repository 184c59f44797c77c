//! Route tables.

use crate::api::handlers::{films, genres, persons};
use crate::api::middleware::rate_limit_middleware;
use crate::state::AppState;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Versioned API routes. Trailing-slash variants are registered explicitly
/// so both spellings resolve without a redirect.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let film_routes = Router::new()
        // Exact routes first (more specific)
        .route("/search", get(films::search))
        .route("/search/", get(films::search))
        .route("/", get(films::listing))
        .route("/:film_id", get(films::detail))
        .route("/:film_id/", get(films::detail))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            rate_limit_middleware,
        ));

    let genre_routes = Router::new()
        .route("/", get(genres::listing))
        .route("/:genre_id", get(genres::detail))
        .route("/:genre_id/", get(genres::detail));

    let person_routes = Router::new()
        // Exact routes first (more specific)
        .route("/search", get(persons::search))
        .route("/search/", get(persons::search))
        .route("/:person_id", get(persons::detail))
        .route("/:person_id/", get(persons::detail))
        .route("/:person_id/film", get(persons::films))
        .route("/:person_id/film/", get(persons::films));

    Router::new()
        .nest("/films", film_routes)
        .nest("/genres", genre_routes)
        .nest("/persons", person_routes)
}
