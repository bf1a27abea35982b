use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Carries the generic message shown to the client; the cause is only logged.
    Internal(&'static str),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Maps a domain failure to a response, hiding store and internal errors
    /// behind `failure`.
    pub fn from_domain(err: DomainError, failure: &'static str) -> Self {
        match err {
            DomainError::NotFound(_) => Self::NotFound(err.to_string()),
            DomainError::Validation(msg) => Self::BadRequest(msg),
            DomainError::Internal(_) | DomainError::ExternalService(_) => {
                tracing::error!(error = %err, "{failure}");
                Self::Internal(failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
            Self::Internal(msg) => msg.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
