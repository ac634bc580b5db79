pub mod attendee_schema;
pub mod event_schema;

pub use attendee_schema::{CreateAttendeeSchema, parse_attendee};
pub use event_schema::{CreateEventSchema, parse_event};
