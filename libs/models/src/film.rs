//! Film records
//!
//! [`Film`] is the full document shape stored in the `movies` collection;
//! [`FilmSummary`] is the trimmed projection used in list and search
//! responses so callers are not handed nested actor/writer/director detail
//! they did not ask for.

use serde::{Deserialize, Serialize};

use crate::genre::Genre;
use crate::person::PersonRole;

/// A film as stored in the search index.
///
/// `id` and `title` are required; a document missing either fails to decode.
/// Everything else tolerates null or absent values. The index stores the
/// genre list under `genres_list`; responses use the shorter `genre` key,
/// which the serde alias keeps decodable both ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "genre", alias = "genres_list", default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub actors: Option<Vec<PersonRole>>,
    #[serde(default)]
    pub writers: Option<Vec<PersonRole>>,
    #[serde(default)]
    pub directors: Option<Vec<PersonRole>>,
}

/// Projection of [`Film`] carrying only id, title, rating and genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(rename = "genre", alias = "genres_list", default)]
    pub genres: Option<Vec<Genre>>,
}

impl FilmSummary {
    /// Project a full film down to its summary fields.
    pub fn from_film(film: &Film) -> Self {
        Self {
            id: film.id.clone(),
            title: film.title.clone(),
            imdb_rating: film.imdb_rating,
            genres: film.genres.clone(),
        }
    }
}
