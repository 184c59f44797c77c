//! Shared application state.

use crate::api::middleware::RateLimiter;
use crate::auth::TokenVerifier;
use crate::cache::{CacheBackend, RedisCache};
use crate::config::Config;
use crate::error::Result;
use crate::search::{DocumentIndex, ElasticIndex};
use crate::services::{FilmService, GenreService, PersonService};
use std::sync::Arc;
use std::time::Duration;

/// Everything handlers need, wired once at startup.
pub struct AppState {
    pub config: Config,
    pub films: FilmService,
    pub genres: GenreService,
    pub persons: PersonService,
    pub auth: TokenVerifier,
    pub limiter: RateLimiter,
}

impl AppState {
    /// Connect to the backends named in `config` and assemble the state.
    pub async fn new(config: Config) -> Result<Arc<Self>> {
        let index: Arc<dyn DocumentIndex> =
            Arc::new(ElasticIndex::new(&config.elasticsearch.url())?);
        let cache: Arc<dyn CacheBackend> =
            Arc::new(RedisCache::connect(&config.redis.url()).await?);
        Ok(Self::with_backends(config, index, cache))
    }

    /// Assemble the state over externally supplied backends. Tests use this
    /// to swap in in-memory stores.
    pub fn with_backends(
        config: Config,
        index: Arc<dyn DocumentIndex>,
        cache: Arc<dyn CacheBackend>,
    ) -> Arc<Self> {
        let films = FilmService::new(
            Arc::clone(&index),
            Arc::clone(&cache),
            Duration::from_secs(config.cache.film_expire_seconds),
        );
        let genres = GenreService::new(
            Arc::clone(&index),
            Arc::clone(&cache),
            Duration::from_secs(config.cache.genre_expire_seconds),
        );
        let persons = PersonService::new(
            Arc::clone(&index),
            Arc::clone(&cache),
            Duration::from_secs(config.cache.person_expire_seconds),
        );
        let auth = TokenVerifier::new(&config);
        let limiter = RateLimiter::new(Arc::clone(&cache), &config.rate_limit);

        Arc::new(Self {
            config,
            films,
            genres,
            persons,
            auth,
            limiter,
        })
    }
}
