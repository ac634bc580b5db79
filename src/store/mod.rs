//! Persistence gateway for events and attendees.
//!
//! Handlers only see the [`EventStore`] trait. Two backends implement it:
//! [`mysql::MySqlStore`] for deployments and [`memory::MemoryStore`] for local
//! development and tests.
//!
//! Both backends enforce the capacity and `(event, email)` uniqueness
//! invariants inside `create_attendee` itself, so concurrent registrations
//! cannot over-fill an event.
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Attendee, AttendeeWithEvent, EventWithCount, NewAttendee, NewEvent};

pub mod memory;
pub mod mysql;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event not found: {0}")]
    NotFound(String),
    #[error("event {0} is full")]
    CapacityExceeded(String),
    #[error("email already registered for event {0}")]
    DuplicateRegistration(String),
    #[error(transparent)]
    Persistence(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle injected into every handler.
pub type SharedStore = Arc<dyn EventStore>;

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, event: NewEvent) -> StoreResult<EventWithCount>;
    async fn get_event(&self, id: &str) -> StoreResult<Option<EventWithCount>>;
    /// Events ordered by date ascending.
    async fn list_events(&self) -> StoreResult<Vec<EventWithCount>>;
    /// Removes the event and all its attendees atomically. Returns false if no such event.
    async fn delete_event(&self, id: &str) -> StoreResult<bool>;

    /// Registers an attendee, failing with `NotFound`, `CapacityExceeded` or
    /// `DuplicateRegistration` without writing anything.
    async fn create_attendee(&self, event_id: &str, attendee: NewAttendee) -> StoreResult<Attendee>;
    /// Attendees of one event, most recent registration first.
    async fn list_attendees(&self, event_id: &str) -> StoreResult<Vec<Attendee>>;
    /// Every attendee with its event's id and title, most recent registration first.
    async fn list_all_attendees_with_event(&self) -> StoreResult<Vec<AttendeeWithEvent>>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}
