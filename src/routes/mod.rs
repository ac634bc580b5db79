pub mod attendee_routes;
pub mod event_routes;
