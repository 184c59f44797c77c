//! Application configuration
//!
//! Settings are layered: serde defaults first, then an optional `config.toml`
//! (or `config.yaml`) next to the binary, then `KINOTEKA__*` environment
//! variables, with `__` separating nesting levels
//! (e.g. `KINOTEKA__REDIS__HOST`, `KINOTEKA__CACHE__FILM_EXPIRE_SECONDS`).

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub redis: RedisConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty means no CORS headers are emitted.
    pub cors_origins: Vec<String>,
    /// Upper bound on request body size in bytes.
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
            max_request_body_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the crate's own events when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "kinoteka".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

impl RedisConfig {
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    pub host: String,
    pub port: u16,
}

impl ElasticsearchConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9200,
        }
    }
}

/// Cache entry lifetimes, one per entity kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub film_expire_seconds: u64,
    pub genre_expire_seconds: u64,
    pub person_expire_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            film_expire_seconds: 60 * 5,
            genre_expire_seconds: 60 * 5,
            person_expire_seconds: 60 * 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Verify bearer tokens at all. When false every request is anonymous.
    pub enabled: bool,
    /// Reject requests without a token. Invalid tokens are rejected
    /// regardless as soon as `enabled` is set.
    pub required: bool,
    /// Shared HS256 signing secret.
    pub secret: String,
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            required: false,
            secret: String::new(),
            leeway_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per client per window.
    pub limit: i64,
    /// Window length in seconds.
    pub interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: 1000,
            interval_seconds: 60,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional config file, and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let loader = ConfigLoader::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("KINOTEKA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        loader.try_deserialize()
    }

    /// Sanity checks that should fail startup rather than the first request.
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.enabled && self.auth.secret.is_empty() {
            return Err("auth.secret must be set when auth is enabled".to_string());
        }
        if self.rate_limit.enabled {
            if self.rate_limit.limit < 1 {
                return Err("rate_limit.limit must be at least 1".to_string());
            }
            if self.rate_limit.interval_seconds < 1 {
                return Err("rate_limit.interval_seconds must be at least 1".to_string());
            }
        }
        if self.cache.film_expire_seconds < 1
            || self.cache.genre_expire_seconds < 1
            || self.cache.person_expire_seconds < 1
        {
            return Err("cache expiry must be at least 1 second".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.server.host.parse()?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
