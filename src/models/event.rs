use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled activity attendees can register for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub capacity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counters computed at read time, serialized as `_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeCount {
    pub attendees: i64,
}

/// An event together with its current number of registrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithCount {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "_count")]
    pub count: AttendeeCount,
}

impl EventWithCount {
    pub fn attendee_count(&self) -> i64 {
        self.count.attendees
    }

    /// True once the event holds as many attendees as its capacity allows.
    pub fn is_full(&self) -> bool {
        self.count.attendees >= i64::from(self.event.capacity)
    }
}

/// Validated input for creating an event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub capacity: i32,
    pub category: Option<String>,
    pub location: Option<String>,
}
