//! Shared harness for API tests.

pub mod memory;

use anyhow::Result;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use kinoteka::api::create_router;
use kinoteka::cache::CacheBackend;
use kinoteka::search::DocumentIndex;
use kinoteka::{AppState, Config};
use memory::{MemoryCache, MemoryIndex};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub const TEST_AUTH_SECRET: &str = "integration-test-secret";

/// The service assembled over in-memory backends. The backend handles stay
/// exposed so tests can seed documents and inspect cache traffic.
pub struct TestApp {
    router: Router,
    pub index: Arc<MemoryIndex>,
    pub cache: Arc<MemoryCache>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let index = Arc::new(MemoryIndex::new());
        let cache = Arc::new(MemoryCache::new());
        let index_backend: Arc<dyn DocumentIndex> = index.clone();
        let cache_backend: Arc<dyn CacheBackend> = cache.clone();
        let state = AppState::with_backends(config, index_backend, cache_backend);
        Self {
            router: create_router(state),
            index,
            cache,
        }
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
        self.request(uri, &[]).await
    }

    pub async fn get_with_headers(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
        self.request(uri, headers).await
    }

    /// GET and decode the body as JSON. An empty body decodes to `null`.
    pub async fn get_json(&self, uri: &str) -> Result<(StatusCode, Value)> {
        let (status, _, body) = self.request(uri, &[]).await?;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)?
        };
        Ok((status, value))
    }

    async fn request(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await?
            .to_vec();
        Ok((status, headers, body))
    }
}

/// Config for tests. Never reads the environment; rate limiting is off
/// unless a test turns it back on.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.rate_limit.enabled = false;
    config
}

pub fn assert_status(status: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(status, expected, "unexpected status for {context}");
}

/// Mint a token the test verifier accepts.
pub fn bearer_token(user_id: &str, role_id: i64) -> String {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": user_id, "role_id": role_id, "exp": exp }),
        &EncodingKey::from_secret(TEST_AUTH_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn film_doc(id: &str, title: &str, rating: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "imdb_rating": rating,
        "description": format!("{title} description"),
        "genres_list": [],
        "actors": [],
        "writers": [],
        "directors": []
    })
}

pub fn genre_doc(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn person_doc(id: &str, full_name: &str) -> Value {
    json!({ "id": id, "full_name": full_name })
}
