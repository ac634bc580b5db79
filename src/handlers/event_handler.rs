use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::models::EventWithCount;
use crate::schemas::parse_event;
use crate::store::SharedStore;
use crate::utils::error::ApiError;
use crate::utils::handler::HandlerResult;
use crate::utils::response::SuccessBody;

/// GET /events, ordered by date ascending.
pub async fn index(Extension(store): Extension<SharedStore>) -> HandlerResult<Vec<EventWithCount>> {
    let events = store
        .list_events()
        .await
        .map_err(|e| ApiError::from_store("Failed to fetch events", e))?;
    Ok((StatusCode::OK, Json(events)))
}

/// POST /events
pub async fn store(
    Extension(store): Extension<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<EventWithCount> {
    let Json(body) = payload?;
    let new_event = parse_event(body)?;

    let event = store
        .create_event(new_event)
        .await
        .map_err(|e| ApiError::from_store("Failed to create event", e))?;
    tracing::info!(event_id = %event.event.id, capacity = event.event.capacity, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events/{id}
pub async fn show(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> HandlerResult<EventWithCount> {
    let event = store
        .get_event(&id)
        .await
        .map_err(|e| ApiError::from_store("Failed to fetch event", e))?
        .ok_or_else(ApiError::event_not_found)?;
    Ok((StatusCode::OK, Json(event)))
}

/// DELETE /events/{id}, removing the event's attendees with it.
pub async fn destroy(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> HandlerResult<SuccessBody> {
    let deleted = store
        .delete_event(&id)
        .await
        .map_err(|e| ApiError::from_store("Failed to delete event", e))?;
    if !deleted {
        return Err(ApiError::event_not_found());
    }
    tracing::info!(event_id = %id, "event deleted");
    Ok((StatusCode::OK, Json(SuccessBody::ok())))
}
