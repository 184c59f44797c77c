//! Application error type and its HTTP mapping.
//!
//! Handlers and services return [`Result`]; the [`IntoResponse`] impl turns
//! each variant into the wire shape the API promises (`{"detail": ...}`).
//! Backend failures are logged here and answered with a generic message so
//! connection strings never leak into responses.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("film not found")]
    FilmNotFound,

    #[error("genre not found")]
    GenreNotFound,

    #[error("person not found")]
    PersonNotFound,

    /// Request parameters failed validation.
    #[error("{0}")]
    InvalidInput(String),

    #[error("too many requests")]
    RateLimited { retry_after: u64 },

    /// The document index could not be reached or answered with an error
    /// status.
    #[error("search backend error: {0}")]
    Search(#[from] reqwest::Error),

    /// The cache could not be reached.
    #[error("cache backend error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A stored document or cache entry did not decode into its model.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Error::FilmNotFound | Error::GenreNotFound | Error::PersonNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::InvalidInput(message) => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
            Error::RateLimited { retry_after } => {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    Json(json!({ "detail": "too many requests" })),
                )
                    .into_response();
            }
            Error::Search(source) => {
                tracing::error!(error = %source, "search backend request failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "search backend unavailable".to_string(),
                )
            }
            Error::Cache(source) => {
                tracing::error!(error = %source, "cache backend request failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "cache backend unavailable".to_string(),
                )
            }
            Error::MalformedDocument(context) => {
                tracing::error!(context = %context, "document failed to decode");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Error::Other(source) => {
                tracing::error!(error = %source, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
