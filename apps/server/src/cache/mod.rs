//! Transparent read-through cache.
//!
//! Services consult the cache before the search backend and store what they
//! fetched, keyed by the canonical query key. The backend trait keeps Redis
//! out of the services so tests can drop in an in-memory store.

pub mod entry;
pub mod key;
pub mod redis;

pub use key::CacheKey;
pub use redis::RedisCache;

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Minimal key-value surface the service needs from its cache store.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Increment a counter, arming `ttl` when the counter is created.
    async fn incr(&self, key: &str, ttl: Duration) -> Result<i64>;
}

/// Entity kinds that can live in the cache. `KIND` prefixes every key.
pub trait Cacheable: Serialize + DeserializeOwned + Send + Sync {
    const KIND: &'static str;
}

impl Cacheable for kinoteka_models::Film {
    const KIND: &'static str = "Film";
}

impl Cacheable for kinoteka_models::Genre {
    const KIND: &'static str = "Genre";
}

impl Cacheable for kinoteka_models::Person {
    const KIND: &'static str = "Person";
}

/// Cache handle for one entity kind with a fixed entry lifetime.
pub struct EntityCache<T> {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
    _marker: PhantomData<T>,
}

impl<T> Clone for EntityCache<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ttl: self.ttl,
            _marker: PhantomData,
        }
    }
}

impl<T: Cacheable> EntityCache<T> {
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            _marker: PhantomData,
        }
    }

    pub fn key(&self, bindings: &[(&str, String)]) -> CacheKey {
        CacheKey::new(T::KIND, bindings)
    }

    pub async fn get_one(&self, key: &CacheKey) -> Result<Option<T>> {
        match self.backend.get(key.as_str()).await? {
            Some(bytes) => Ok(Some(entry::decode_one(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn get_list(&self, key: &CacheKey) -> Result<Option<Vec<T>>> {
        match self.backend.get(key.as_str()).await? {
            Some(bytes) => Ok(Some(entry::decode_list(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn put_one(&self, key: &CacheKey, record: &T) -> Result<()> {
        let bytes = entry::encode_one(record)?;
        self.backend.set(key.as_str(), bytes, self.ttl).await
    }

    pub async fn put_list(&self, key: &CacheKey, records: &[T]) -> Result<()> {
        let bytes = entry::encode_list(records)?;
        self.backend.set(key.as_str(), bytes, self.ttl).await
    }
}
