//! Kinoteka: a read-only movie catalog API.
//!
//! Films, genres and persons live in an Elasticsearch-compatible document
//! store; hot reads are served from Redis through a transparent cache-aside
//! layer. The crate exposes the router and state assembly so integration
//! tests can run the whole service against in-memory backends.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod request_context;
pub mod search;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
