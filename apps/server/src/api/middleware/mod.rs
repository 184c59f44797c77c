//! HTTP middleware.

pub mod layers;
pub mod rate_limit;
pub mod request_id;

pub use layers::{compression, cors};
pub use rate_limit::{rate_limit_middleware, RateLimiter};
pub use request_id::request_id_middleware;
