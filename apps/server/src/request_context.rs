//! Per-request context.

use uuid::Uuid;

/// Identifiers attached to a request as it moves through the service.
///
/// `request_id` is always server-generated. When the caller sent its own
/// `x-request-id` the value is kept so the response can echo it back as
/// `x-correlation-id`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub client_request_id: Option<String>,
}

impl RequestContext {
    pub fn new(client_request_id: Option<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            client_request_id,
        }
    }
}
