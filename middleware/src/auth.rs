//! Shared-secret authorization applied to every message route.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::{debug, instrument, warn};

/// Header carrying the secret key.
pub const SECRET_KEY_HEADER: &str = "x-api-key";
/// Query parameter accepted when the header is absent.
pub const SECRET_KEY_QUERY_PARAM: &str = "api_key";

/// The process-wide secret every request must present.
#[derive(Clone)]
pub struct SecretKeyConfig {
    secret_key: String,
}

impl SecretKeyConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }

    /// Constant-time equality against the configured secret.
    pub fn verify(&self, candidate: &str) -> bool {
        candidate
            .as_bytes()
            .ct_eq(self.secret_key.as_bytes())
            .into()
    }
}

impl fmt::Debug for SecretKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKeyConfig")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    Missing,
    Invalid,
}

impl AuthRejection {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthRejection::Missing => StatusCode::UNAUTHORIZED,
            AuthRejection::Invalid => StatusCode::FORBIDDEN,
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            AuthRejection::Missing => "Missing secret key",
            AuthRejection::Invalid => "Invalid secret key",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

/// Reads the credential from the `X-API-Key` header, falling back to the `api_key` query parameter.
///
/// A header that is not visible ASCII was still sent, so it is rejected as
/// [`AuthRejection::Invalid`] rather than treated as absent.
pub fn extract_secret_key(req: &Request) -> Result<Option<String>, AuthRejection> {
    if let Some(value) = req.headers().get(SECRET_KEY_HEADER) {
        return value
            .to_str()
            .map(|key| Some(key.to_string()))
            .map_err(|_| AuthRejection::Invalid);
    }

    Ok(Query::<HashMap<String, String>>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(mut params)| params.remove(SECRET_KEY_QUERY_PARAM)))
}

/// Checks the request credential against `config`.
pub fn authorize(config: &SecretKeyConfig, req: &Request) -> Result<(), AuthRejection> {
    match extract_secret_key(req)? {
        None => Err(AuthRejection::Missing),
        Some(key) if key.is_empty() => Err(AuthRejection::Missing),
        Some(key) if config.verify(&key) => Ok(()),
        Some(_) => Err(AuthRejection::Invalid),
    }
}

/// Axum middleware: rejects the request unless it carries the configured secret key.
#[instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn require_secret_key(
    State(config): State<Arc<SecretKeyConfig>>,
    req: Request,
    next: Next,
) -> Response {
    match authorize(&config, &req) {
        Ok(()) => {
            debug!("Request authorized");
            next.run(req).await
        }
        Err(rejection) => {
            warn!(reason = rejection.detail(), "Unauthorized access attempt");
            rejection.into_response()
        }
    }
}
