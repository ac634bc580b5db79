//! MySQL-backed store.
//!
//! Schema lives in `migrations/`. `attendees.event_id` references `events.id`
//! with `ON DELETE CASCADE` and `(event_id, email)` carries a unique key.
//! `attendees.seq` is an insert counter that breaks ties between registrations
//! sharing a millisecond, so listings match the in-memory backend's order.
//! Registration runs in a transaction that locks the parent event row, which
//! serializes concurrent registrations for the same event.
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use super::{EventStore, StoreError, StoreResult};
use crate::models::{
    Attendee, AttendeeCount, AttendeeWithEvent, Event, EventSummary, EventWithCount, NewAttendee,
    NewEvent,
};

const EVENT_COLUMNS: &str = r#"
    e.id, e.title, e.description, e.date, e.capacity, e.category, e.location, e.created_at,
    (SELECT COUNT(*) FROM attendees a WHERE a.event_id = e.id) AS attendee_count
"#;

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    date: DateTime<Utc>,
    capacity: i32,
    category: Option<String>,
    location: Option<String>,
    created_at: DateTime<Utc>,
    attendee_count: i64,
}

impl From<EventRow> for EventWithCount {
    fn from(row: EventRow) -> Self {
        EventWithCount {
            event: Event {
                id: row.id,
                title: row.title,
                description: row.description,
                date: row.date,
                capacity: row.capacity,
                category: row.category,
                location: row.location,
                created_at: row.created_at,
            },
            count: AttendeeCount {
                attendees: row.attendee_count,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct AttendeeEventRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    registered_at: DateTime<Utc>,
    event_id: String,
    event_title: String,
}

impl From<AttendeeEventRow> for AttendeeWithEvent {
    fn from(row: AttendeeEventRow) -> Self {
        AttendeeWithEvent {
            event: EventSummary {
                id: row.event_id.clone(),
                title: row.event_title,
            },
            attendee: Attendee {
                id: row.id,
                name: row.name,
                email: row.email,
                phone: row.phone,
                registered_at: row.registered_at,
                event_id: row.event_id,
            },
        }
    }
}

/// Maps a failed attendee insert, turning the `(event_id, email)` unique-key
/// violation into a typed error.
fn classify_insert_error(event_id: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateRegistration(event_id.to_string())
        }
        // The parent row vanished between lock and insert (FK violation)
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            StoreError::NotFound(event_id.to_string())
        }
        _ => StoreError::Persistence(err),
    }
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl EventStore for MySqlStore {
    async fn create_event(&self, event: NewEvent) -> StoreResult<EventWithCount> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().trunc_subsecs(3);

        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, date, capacity, category, location, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.capacity)
        .bind(&event.category)
        .bind(&event.location)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(EventWithCount {
            event: Event {
                id,
                title: event.title,
                description: event.description,
                date: event.date,
                capacity: event.capacity,
                category: event.category,
                location: event.location,
                created_at,
            },
            count: AttendeeCount::default(),
        })
    }

    async fn get_event(&self, id: &str) -> StoreResult<Option<EventWithCount>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(EventWithCount::from))
    }

    async fn list_events(&self) -> StoreResult<Vec<EventWithCount>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events e ORDER BY e.date ASC, e.created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(EventWithCount::from).collect())
    }

    async fn delete_event(&self, id: &str) -> StoreResult<bool> {
        // The FK cascade would cover attendees too; deleting them explicitly in the
        // same transaction keeps the operation atomic regardless of engine settings.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM attendees WHERE event_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn create_attendee(&self, event_id: &str, attendee: NewAttendee) -> StoreResult<Attendee> {
        let mut tx = self.pool.begin().await?;

        // Lock the event row so concurrent registrations queue behind this one
        let capacity: Option<i32> =
            sqlx::query_scalar("SELECT capacity FROM events WHERE id = ? FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(capacity) = capacity else {
            return Err(StoreError::NotFound(event_id.to_string()));
        };

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;
        if count >= i64::from(capacity) {
            tracing::debug!(event_id, count, capacity, "registration rejected: event full");
            return Err(StoreError::CapacityExceeded(event_id.to_string()));
        }

        let created = Attendee {
            id: Uuid::new_v4().to_string(),
            name: attendee.name,
            email: attendee.email,
            phone: attendee.phone,
            registered_at: Utc::now().trunc_subsecs(3),
            event_id: event_id.to_string(),
        };
        sqlx::query(
            r#"
            INSERT INTO attendees (id, name, email, phone, registered_at, event_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&created.id)
        .bind(&created.name)
        .bind(&created.email)
        .bind(&created.phone)
        .bind(created.registered_at)
        .bind(&created.event_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify_insert_error(event_id, e))?;

        tx.commit().await?;
        Ok(created)
    }

    async fn list_attendees(&self, event_id: &str) -> StoreResult<Vec<Attendee>> {
        let attendees = sqlx::query_as::<_, Attendee>(
            r#"
            SELECT id, name, email, phone, registered_at, event_id
            FROM attendees
            WHERE event_id = ?
            ORDER BY registered_at DESC, seq DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(attendees)
    }

    async fn list_all_attendees_with_event(&self) -> StoreResult<Vec<AttendeeWithEvent>> {
        let rows = sqlx::query_as::<_, AttendeeEventRow>(
            r#"
            SELECT a.id, a.name, a.email, a.phone, a.registered_at, a.event_id,
                   e.title AS event_title
            FROM attendees a
            INNER JOIN events e ON e.id = a.event_id
            ORDER BY a.registered_at DESC, a.seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AttendeeWithEvent::from).collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }
}
