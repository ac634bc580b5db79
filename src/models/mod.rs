pub mod attendee;
pub mod event;

pub use attendee::{Attendee, AttendeeWithEvent, EventSummary, NewAttendee};
pub use event::{AttendeeCount, Event, EventWithCount, NewEvent};
