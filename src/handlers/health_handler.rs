use axum::{Extension, Json, http::StatusCode};
use serde_json::{Value, json};

use crate::store::SharedStore;
use crate::utils::error::ApiError;
use crate::utils::handler::HandlerResult;

pub async fn health(Extension(store): Extension<SharedStore>) -> HandlerResult<Value> {
    // Try a simple store ping
    match store.health_check().await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({ "status": "ok", "db": "ok", "backend": store.backend_name() })),
        )),
        Err(e) => Err(ApiError::from_store("Unhealthy", e)),
    }
}
