//! Genre endpoints.

use crate::api::extractors::Pagination;
use crate::error::{Error, Result};
use crate::search::SortSpec;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use kinoteka_models::{Genre, Paginated};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ListingParams {
    sort: Option<String>,
}

/// `GET /api/v1/genres`
///
/// Alphabetical by default. An empty page answers 404.
pub async fn listing(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
    Pagination(page): Pagination,
) -> Result<Json<Paginated<Genre>>> {
    let sort = params
        .sort
        .as_deref()
        .map(SortSpec::parse)
        .unwrap_or_else(|| SortSpec::ascending("name"));

    let genres = state.genres.listing(&sort, page).await?;
    if genres.is_empty() {
        return Err(Error::GenreNotFound);
    }
    Ok(Json(Paginated::new(genres, page.number, page.size)))
}

/// `GET /api/v1/genres/{genre_id}`
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<String>,
) -> Result<Json<Genre>> {
    let genre = state
        .genres
        .by_id(&genre_id)
        .await?
        .ok_or(Error::GenreNotFound)?;
    Ok(Json(genre))
}
