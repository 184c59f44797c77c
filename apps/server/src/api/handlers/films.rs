//! Film endpoints.

use crate::api::extractors::Pagination;
use crate::auth::AuthenticatedPrincipal;
use crate::error::{Error, Result};
use crate::search::SortSpec;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use kinoteka_models::{Film, FilmSummary, Paginated};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ListingParams {
    sort: Option<String>,
    genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    search: Option<String>,
}

/// `GET /api/v1/films`
///
/// Ordered listing, best rated first by default, optionally narrowed to one
/// genre. An empty page answers 404.
pub async fn listing(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
    Pagination(page): Pagination,
) -> Result<Json<Paginated<FilmSummary>>> {
    let sort = params
        .sort
        .as_deref()
        .map(SortSpec::parse)
        .unwrap_or_else(|| SortSpec::descending("imdb_rating"));

    let films = state
        .films
        .listing(&sort, params.genre.as_deref(), page)
        .await?;
    if films.is_empty() {
        return Err(Error::FilmNotFound);
    }
    Ok(Json(Paginated::new(films, page.number, page.size)))
}

/// `GET /api/v1/films/search`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
    Pagination(page): Pagination,
) -> Result<Json<Paginated<FilmSummary>>> {
    let Some(search) = params.search.filter(|search| !search.trim().is_empty()) else {
        return Err(Error::InvalidInput("search must not be empty".to_string()));
    };

    let films = state.films.search(&search, page).await?;
    if films.is_empty() {
        return Err(Error::FilmNotFound);
    }
    Ok(Json(Paginated::new(films, page.number, page.size)))
}

/// `GET /api/v1/films/{film_id}`
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(film_id): Path<String>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<Film>> {
    if let Some(principal) = &principal {
        tracing::debug!(user_id = %principal.user_id, film_id = %film_id, "film detail requested");
    }

    let film = state
        .films
        .by_id(&film_id)
        .await?
        .ok_or(Error::FilmNotFound)?;
    Ok(Json(film))
}
