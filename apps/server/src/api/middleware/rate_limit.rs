//! Fixed-window rate limiting.
//!
//! Counters live in the cache store under `throttle:{client}:{window}`, so
//! every replica draws from the same budget. A backend failure lets the
//! request through; throttling must never take the read path down with it.

use crate::cache::CacheBackend;
use crate::config::RateLimitConfig;
use crate::error::Error;
use crate::state::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Clone)]
pub struct RateLimiter {
    backend: Arc<dyn CacheBackend>,
    enabled: bool,
    limit: i64,
    interval: Duration,
}

pub enum Decision {
    Allowed,
    Limited { retry_after: u64 },
}

impl RateLimiter {
    pub fn new(backend: Arc<dyn CacheBackend>, config: &RateLimitConfig) -> Self {
        Self {
            backend,
            enabled: config.enabled,
            limit: config.limit,
            interval: Duration::from_secs(config.interval_seconds),
        }
    }

    /// Count one request for `client` against the current window.
    pub async fn check(&self, client: &str) -> Decision {
        if !self.enabled {
            return Decision::Allowed;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let interval = self.interval.as_secs().max(1);
        let window = now / interval;
        let key = format!("throttle:{client}:{window}");

        match self.backend.incr(&key, self.interval).await {
            Ok(count) if count > self.limit => Decision::Limited {
                retry_after: interval - now % interval,
            },
            Ok(_) => Decision::Allowed,
            Err(error) => {
                tracing::warn!(error = %error, "rate limit check failed, allowing request");
                Decision::Allowed
            }
        }
    }
}

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);
    match state.limiter.check(&client).await {
        Decision::Allowed => next.run(request).await,
        Decision::Limited { retry_after } => {
            tracing::debug!(client = %client, "request rate limited");
            Error::RateLimited { retry_after }.into_response()
        }
    }
}

/// Best client address available: proxy headers first, then the socket.
fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
    {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
