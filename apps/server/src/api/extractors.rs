//! Request parameter extractors.

use crate::error::Error;
use crate::search::Page;
use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

/// Validated pagination window from `page_number` and `page_size`.
///
/// Both parameters are 1-based and optional; the default is the first page
/// of ten. Zero or negative values are rejected with 422.
pub struct Pagination(pub Page);

#[derive(Debug, Deserialize)]
struct RawPagination {
    page_number: Option<i64>,
    page_size: Option<i64>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPagination>::from_request_parts(parts, state)
            .await
            .map_err(|err| Error::InvalidInput(err.to_string()))?;

        let number = positive("page_number", raw.page_number, 1)?;
        let size = positive("page_size", raw.page_size, 10)?;
        Ok(Self(Page { number, size }))
    }
}

fn positive(name: &str, value: Option<i64>, default: u32) -> Result<u32, Error> {
    match value {
        None => Ok(default),
        Some(value) if value >= 1 => {
            u32::try_from(value).map_err(|_| Error::InvalidInput(format!("{name} is out of range")))
        }
        Some(_) => Err(Error::InvalidInput(format!("{name} must be at least 1"))),
    }
}
