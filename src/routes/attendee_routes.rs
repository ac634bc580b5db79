use axum::{Router, routing::get};

use crate::handlers::attendee_handler::all;

pub fn attendee_routes() -> Router {
    Router::new().route("/attendees", get(all))
}
