//! Genre reads.

use crate::cache::{CacheBackend, EntityCache};
use crate::error::Result;
use crate::search::{collections, decode_document, decode_documents};
use crate::search::{query, DocumentIndex, Page, SortSpec};
use kinoteka_models::Genre;
use std::sync::Arc;
use std::time::Duration;

pub struct GenreService {
    index: Arc<dyn DocumentIndex>,
    cache: EntityCache<Genre>,
}

impl GenreService {
    pub fn new(index: Arc<dyn DocumentIndex>, cache: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            index,
            cache: EntityCache::new(cache, ttl),
        }
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<Genre>> {
        let key = self.cache.key(&[("uuid", id.to_string())]);
        if let Some(genre) = self.cache.get_one(&key).await? {
            tracing::debug!(%key, "genre served from cache");
            return Ok(Some(genre));
        }

        let Some(source) = self.index.get(collections::GENRES, id).await? else {
            return Ok(None);
        };
        let genre: Genre = decode_document(collections::GENRES, source)?;
        self.cache.put_one(&key, &genre).await?;
        Ok(Some(genre))
    }

    /// Cached listing. The genre set is small and changes rarely, so whole
    /// pages are cached by their window and order. Empty pages are returned
    /// but never stored.
    pub async fn listing(&self, sort: &SortSpec, page: Page) -> Result<Vec<Genre>> {
        let key = self.cache.key(&[
            ("page_number", page.number.to_string()),
            ("page_size", page.size.to_string()),
            ("sort", sort.to_string()),
        ]);
        if let Some(genres) = self.cache.get_list(&key).await? {
            tracing::debug!(%key, "genre listing served from cache");
            return Ok(genres);
        }

        let body = query::genre_listing(sort, page);
        let sources = self.index.search(collections::GENRES, body).await?;
        let genres: Vec<Genre> = decode_documents(collections::GENRES, sources)?;
        if !genres.is_empty() {
            self.cache.put_list(&key, &genres).await?;
        }
        Ok(genres)
    }
}
