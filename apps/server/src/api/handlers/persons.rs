//! Person endpoints.

use crate::api::extractors::Pagination;
use crate::error::{Error, Result};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use kinoteka_models::{FilmSummary, Paginated, Person};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    name: Option<String>,
}

/// `GET /api/v1/persons/search`
///
/// Name search. No matches is an empty page, not an error.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
    Pagination(page): Pagination,
) -> Result<Json<Paginated<Person>>> {
    let Some(name) = params.name.filter(|name| !name.trim().is_empty()) else {
        return Err(Error::InvalidInput("name must not be empty".to_string()));
    };

    let persons = state.persons.search(&name, page).await?;
    Ok(Json(Paginated::new(persons, page.number, page.size)))
}

/// `GET /api/v1/persons/{person_id}`
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
) -> Result<Json<Person>> {
    let person = state
        .persons
        .by_id(&person_id)
        .await?
        .ok_or(Error::PersonNotFound)?;
    Ok(Json(person))
}

/// `GET /api/v1/persons/{person_id}/film`
///
/// Films the person worked on in any role. No participation is an empty
/// page, not an error.
pub async fn films(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
    Pagination(page): Pagination,
) -> Result<Json<Paginated<FilmSummary>>> {
    let films = state.films.by_person(&person_id, page).await?;
    Ok(Json(Paginated::new(films, page.number, page.size)))
}
