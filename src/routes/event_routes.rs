use axum::{Router, routing::get};

use crate::handlers::{attendee_handler, event_handler};

pub fn event_routes() -> Router {
    Router::new()
        .route("/events", get(event_handler::index).post(event_handler::store))
        .route("/events/{id}", get(event_handler::show).delete(event_handler::destroy))
        .route(
            "/events/{id}/attendees",
            get(attendee_handler::index).post(attendee_handler::store),
        )
}
