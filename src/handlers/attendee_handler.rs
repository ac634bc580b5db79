use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::models::{Attendee, AttendeeWithEvent};
use crate::schemas::parse_attendee;
use crate::store::{EventStore, SharedStore};
use crate::utils::error::ApiError;
use crate::utils::handler::HandlerResult;

const REGISTER_FAILED: &str = "Failed to register attendee";

/// Registers an attendee for an event.
///
/// The event must exist and have a free seat before the payload is even
/// validated. The store repeats the capacity check atomically while inserting,
/// so two requests racing for the last seat cannot both succeed.
pub async fn register_attendee(
    store: &dyn EventStore,
    event_id: &str,
    body: Value,
) -> Result<Attendee, ApiError> {
    let event = store
        .get_event(event_id)
        .await
        .map_err(|e| ApiError::from_store(REGISTER_FAILED, e))?
        .ok_or_else(ApiError::event_not_found)?;

    if event.is_full() {
        return Err(ApiError::CapacityExceeded);
    }

    let attendee = parse_attendee(body)?;
    store
        .create_attendee(event_id, attendee)
        .await
        .map_err(|e| ApiError::from_store(REGISTER_FAILED, e))
}

/// GET /events/{id}/attendees, most recent registration first.
pub async fn index(
    Extension(store): Extension<SharedStore>,
    Path(event_id): Path<String>,
) -> HandlerResult<Vec<Attendee>> {
    let attendees = store
        .list_attendees(&event_id)
        .await
        .map_err(|e| ApiError::from_store("Failed to fetch attendees", e))?;
    Ok((StatusCode::OK, Json(attendees)))
}

/// POST /events/{id}/attendees
pub async fn store(
    Extension(store): Extension<SharedStore>,
    Path(event_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Attendee> {
    let Json(body) = payload?;
    match register_attendee(store.as_ref(), &event_id, body).await {
        Ok(attendee) => {
            tracing::info!(%event_id, attendee_id = %attendee.id, "attendee registered");
            Ok((StatusCode::CREATED, Json(attendee)))
        }
        Err(err) => {
            if matches!(err, ApiError::CapacityExceeded | ApiError::DuplicateRegistration) {
                tracing::warn!(%event_id, reason = %err, "registration rejected");
            }
            Err(err)
        }
    }
}

/// GET /attendees, across all events.
pub async fn all(Extension(store): Extension<SharedStore>) -> HandlerResult<Vec<AttendeeWithEvent>> {
    let attendees = store
        .list_all_attendees_with_event()
        .await
        .map_err(|e| ApiError::from_store("Failed to fetch attendees", e))?;
    Ok((StatusCode::OK, Json(attendees)))
}
