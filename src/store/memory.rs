//! In-memory store for local development and tests.
//!
//! State lives in a single `tokio::sync::RwLock`, so registration holds the
//! write lock across the capacity check and the insert. Nothing is durable.
use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EventStore, StoreError, StoreResult};
use crate::models::{
    Attendee, AttendeeCount, AttendeeWithEvent, Event, EventSummary, EventWithCount, NewAttendee,
    NewEvent,
};

#[derive(Default)]
struct State {
    events: HashMap<String, Event>,
    // Insertion order; ties on `registered_at` resolve to the later insert.
    attendees: Vec<Attendee>,
}

impl State {
    fn count_for(&self, event_id: &str) -> i64 {
        self.attendees.iter().filter(|a| a.event_id == event_id).count() as i64
    }

    fn with_count(&self, event: &Event) -> EventWithCount {
        EventWithCount {
            event: event.clone(),
            count: AttendeeCount {
                attendees: self.count_for(&event.id),
            },
        }
    }

    fn newest_first<'a>(&'a self, filter: impl Fn(&Attendee) -> bool) -> Vec<&'a Attendee> {
        let mut list: Vec<&Attendee> = self.attendees.iter().rev().filter(|a| filter(*a)).collect();
        list.sort_by_key(|a| Reverse(a.registered_at));
        list
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create_event(&self, event: NewEvent) -> StoreResult<EventWithCount> {
        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: event.title,
            description: event.description,
            date: event.date,
            capacity: event.capacity,
            category: event.category,
            location: event.location,
            created_at: Utc::now().trunc_subsecs(3),
        };
        let mut state = self.state.write().await;
        state.events.insert(event.id.clone(), event.clone());
        Ok(EventWithCount {
            event,
            count: AttendeeCount::default(),
        })
    }

    async fn get_event(&self, id: &str) -> StoreResult<Option<EventWithCount>> {
        let state = self.state.read().await;
        Ok(state.events.get(id).map(|e| state.with_count(e)))
    }

    async fn list_events(&self) -> StoreResult<Vec<EventWithCount>> {
        let state = self.state.read().await;
        let mut events: Vec<&Event> = state.events.values().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(events.into_iter().map(|e| state.with_count(e)).collect())
    }

    async fn delete_event(&self, id: &str) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.events.remove(id).is_none() {
            return Ok(false);
        }
        state.attendees.retain(|a| a.event_id != id);
        Ok(true)
    }

    async fn create_attendee(&self, event_id: &str, attendee: NewAttendee) -> StoreResult<Attendee> {
        let mut state = self.state.write().await;
        let capacity = match state.events.get(event_id) {
            Some(event) => i64::from(event.capacity),
            None => return Err(StoreError::NotFound(event_id.to_string())),
        };
        if state.count_for(event_id) >= capacity {
            return Err(StoreError::CapacityExceeded(event_id.to_string()));
        }
        let duplicate = state
            .attendees
            .iter()
            .any(|a| a.event_id == event_id && a.email == attendee.email);
        if duplicate {
            return Err(StoreError::DuplicateRegistration(event_id.to_string()));
        }

        let created = Attendee {
            id: Uuid::new_v4().to_string(),
            name: attendee.name,
            email: attendee.email,
            phone: attendee.phone,
            registered_at: Utc::now().trunc_subsecs(3),
            event_id: event_id.to_string(),
        };
        state.attendees.push(created.clone());
        Ok(created)
    }

    async fn list_attendees(&self, event_id: &str) -> StoreResult<Vec<Attendee>> {
        let state = self.state.read().await;
        Ok(state
            .newest_first(|a| a.event_id == event_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn list_all_attendees_with_event(&self) -> StoreResult<Vec<AttendeeWithEvent>> {
        let state = self.state.read().await;
        Ok(state
            .newest_first(|_| true)
            .into_iter()
            .filter_map(|a| {
                let event = state.events.get(&a.event_id)?;
                Some(AttendeeWithEvent {
                    attendee: a.clone(),
                    event: EventSummary {
                        id: event.id.clone(),
                        title: event.title.clone(),
                    },
                })
            })
            .collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
