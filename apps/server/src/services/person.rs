//! Person reads.

use crate::cache::{CacheBackend, EntityCache};
use crate::error::Result;
use crate::search::{collections, decode_document, decode_documents};
use crate::search::{query, DocumentIndex, Page};
use kinoteka_models::Person;
use std::sync::Arc;
use std::time::Duration;

pub struct PersonService {
    index: Arc<dyn DocumentIndex>,
    cache: EntityCache<Person>,
}

impl PersonService {
    pub fn new(index: Arc<dyn DocumentIndex>, cache: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            index,
            cache: EntityCache::new(cache, ttl),
        }
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<Person>> {
        let key = self.cache.key(&[("uuid", id.to_string())]);
        if let Some(person) = self.cache.get_one(&key).await? {
            tracing::debug!(%key, "person served from cache");
            return Ok(Some(person));
        }

        let Some(source) = self.index.get(collections::PERSONS, id).await? else {
            return Ok(None);
        };
        let person: Person = decode_document(collections::PERSONS, source)?;
        self.cache.put_one(&key, &person).await?;
        Ok(Some(person))
    }

    /// Full-text name search. Not cached.
    pub async fn search(&self, name: &str, page: Page) -> Result<Vec<Person>> {
        let body = query::person_search(name, page);
        let sources = self.index.search(collections::PERSONS, body).await?;
        decode_documents(collections::PERSONS, sources)
    }
}
