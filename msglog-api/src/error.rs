//! HTTP error taxonomy for the message routes.
//!
//! Every error renders as `{"detail": "<message>"}`; storage failures hide their cause from
//! the caller and are logged instead. Authorization failures are produced by
//! [`middleware::AuthRejection`] before a handler runs.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use msglog_core::ValidationError;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The single "no data" response shared by every query endpoint.
    pub fn no_messages() -> Self {
        ApiError::NotFound("No messages found".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    fn log(&self) {
        match self {
            ApiError::Storage(err) => tracing::error!(error = %err, "Storage failure"),
            other => tracing::debug!(error = %other, "Client error"),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidArgument(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
