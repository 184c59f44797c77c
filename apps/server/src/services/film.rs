//! Film reads.

use crate::cache::{CacheBackend, EntityCache};
use crate::error::Result;
use crate::search::{collections, decode_document, decode_documents};
use crate::search::{query, DocumentIndex, Page, SortSpec};
use kinoteka_models::{Film, FilmSummary};
use std::sync::Arc;
use std::time::Duration;

pub struct FilmService {
    index: Arc<dyn DocumentIndex>,
    cache: EntityCache<Film>,
}

impl FilmService {
    pub fn new(index: Arc<dyn DocumentIndex>, cache: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            index,
            cache: EntityCache::new(cache, ttl),
        }
    }

    /// Cached lookup by id. Misses are fetched from the index and stored;
    /// absent films are never stored.
    pub async fn by_id(&self, id: &str) -> Result<Option<Film>> {
        let key = self.cache.key(&[("uuid", id.to_string())]);
        if let Some(film) = self.cache.get_one(&key).await? {
            tracing::debug!(%key, "film served from cache");
            return Ok(Some(film));
        }

        let Some(source) = self.index.get(collections::MOVIES, id).await? else {
            return Ok(None);
        };
        let film: Film = decode_document(collections::MOVIES, source)?;
        self.cache.put_one(&key, &film).await?;
        Ok(Some(film))
    }

    /// Full-text search over titles and descriptions. Not cached.
    pub async fn search(&self, text: &str, page: Page) -> Result<Vec<FilmSummary>> {
        let body = query::film_search(text, page);
        let sources = self.index.search(collections::MOVIES, body).await?;
        let films: Vec<Film> = decode_documents(collections::MOVIES, sources)?;
        Ok(films.iter().map(FilmSummary::from_film).collect())
    }

    /// Listing ordered by `sort`, optionally narrowed to one genre. Not
    /// cached.
    pub async fn listing(
        &self,
        sort: &SortSpec,
        genre_id: Option<&str>,
        page: Page,
    ) -> Result<Vec<FilmSummary>> {
        let body = query::film_listing(sort, genre_id, page);
        let sources = self.index.search(collections::MOVIES, body).await?;
        let films: Vec<Film> = decode_documents(collections::MOVIES, sources)?;
        Ok(films.iter().map(FilmSummary::from_film).collect())
    }

    /// Films a person worked on in any role, best rated first. Not cached.
    pub async fn by_person(&self, person_id: &str, page: Page) -> Result<Vec<FilmSummary>> {
        let body = query::films_by_person(person_id, page);
        let sources = self.index.search(collections::MOVIES, body).await?;
        let films: Vec<Film> = decode_documents(collections::MOVIES, sources)?;
        Ok(films.iter().map(FilmSummary::from_film).collect())
    }
}
