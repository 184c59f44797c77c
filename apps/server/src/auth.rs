//! Bearer token verification.
//!
//! Tokens are HS256 JWTs signed with a shared secret. Verification policy
//! comes from [`crate::config::AuthConfig`]: when disabled every request is
//! anonymous; when enabled a present token must verify, and `required`
//! additionally rejects anonymous requests.

use crate::config::Config;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;

/// Identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid bearer token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    /// Issuers encode this as either a number or a string.
    #[serde(default)]
    role_id: Option<serde_json::Value>,
}

/// Decodes and validates bearer tokens.
pub struct TokenVerifier {
    enabled: bool,
    required: bool,
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.auth.leeway_seconds;
        Self {
            enabled: config.auth.enabled,
            required: config.auth.required,
            key: DecodingKey::from_secret(config.auth.secret.as_bytes()),
            validation,
        }
    }

    /// Resolve the request identity. Anonymous (`None`) passes unless tokens
    /// are required; a present but invalid token is always rejected.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Option<Principal>, AuthError> {
        if !self.enabled {
            return Ok(None);
        }

        let Some(token) = bearer_token(headers) else {
            if self.required {
                return Err(AuthError::MissingToken);
            }
            return Ok(None);
        };

        let data = jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(Some(principal_from_claims(data.claims)))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn principal_from_claims(claims: Claims) -> Principal {
    let role_id = claims.role_id.and_then(|value| match value {
        serde_json::Value::String(role) => Some(role),
        serde_json::Value::Number(role) => Some(role.to_string()),
        _ => None,
    });
    Principal {
        user_id: claims.sub,
        role_id,
    }
}

/// Request extension carrying the resolved identity.
#[derive(Debug, Clone)]
pub struct AuthContext(pub Option<Principal>);

/// Extractor for handlers that want to know who is asking.
pub struct AuthenticatedPrincipal(pub Option<Principal>);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<AuthContext>()
            .and_then(|context| context.0.clone());
        Ok(Self(principal))
    }
}

/// Verifies the bearer token before the request reaches a handler.
/// Preflight requests pass through untouched.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    match state.auth.authenticate(request.headers()) {
        Ok(principal) => {
            request.extensions_mut().insert(AuthContext(principal));
            next.run(request).await
        }
        Err(error) => error.into_response(),
    }
}
