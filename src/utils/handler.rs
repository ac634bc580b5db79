use axum::{Json, http::StatusCode};

use crate::utils::error::ApiError;

/// Generic handler result type used across HTTP handlers to simplify signatures.
pub type HandlerResult<T> = Result<(StatusCode, Json<T>), ApiError>;
