pub mod attendee_handler;
pub mod event_handler;
pub mod health_handler;
