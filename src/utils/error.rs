use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;
use crate::utils::response::ErrorBody;
use crate::utils::validation::ValidationError;

/// Every failure a handler can report, each tied to one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Event is full")]
    CapacityExceeded,
    #[error("Email already registered for this event")]
    DuplicateRegistration,
    /// Unclassified failure; the message is safe to show, the cause was logged.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::CapacityExceeded => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateRegistration => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translate a store failure. `context` becomes the client-facing message
    /// for persistence errors, whose details are only logged.
    pub fn from_store(context: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Event not found".to_string()),
            StoreError::CapacityExceeded(_) => ApiError::CapacityExceeded,
            StoreError::DuplicateRegistration(_) => ApiError::DuplicateRegistration,
            StoreError::Persistence(e) => {
                tracing::error!(error = %e, "{context}");
                ApiError::Internal(context.to_string())
            }
        }
    }

    pub fn event_not_found() -> Self {
        ApiError::NotFound("Event not found".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => ErrorBody::with_errors("Validation error", errors.fields),
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
