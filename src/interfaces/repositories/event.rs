use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    entities::event::{has_capacity, Event, EventInsert, RegistrationOutcome},
    errors::AppError,
    repositories::sqlx_repo::SqlxEventRepo,
};

const EVENT_SELECT: &str = r#"
    SELECT
        e.id, e.title, e.slug, e.description, e.event_date, e.event_time,
        e.location, e.is_virtual, e.max_attendees, e.category, e.is_featured,
        e.organizer_id, e.created_at, e.updated_at,
        (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id) AS attendee_count
    FROM events e
"#;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError>;
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError>;
    /// Events on or after `from`, soonest first.
    async fn upcoming_events(&self, from: NaiveDate, limit: i64) -> Result<Vec<Event>, AppError>;
    /// Events before `before`, most recent first.
    async fn past_events(&self, before: NaiveDate, limit: i64) -> Result<Vec<Event>, AppError>;
    /// Registers `user_id` unless already registered or the event is full.
    async fn register_attendee(&self, event_id: Uuid, user_id: Uuid) -> Result<RegistrationOutcome, AppError>;
    /// Returns false when there was no registration to cancel.
    async fn cancel_registration(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;
}

impl SqlxEventRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxEventRepo { pool }
    }
}

#[async_trait]
impl EventRepository for SqlxEventRepo {
    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO events (
                title, slug, description, event_date, event_time, location,
                is_virtual, max_attendees, category, is_featured, organizer_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(event.event_time)
        .bind(&event.location)
        .bind(event.is_virtual)
        .bind(event.max_attendees)
        .bind(event.category)
        .bind(event.is_featured)
        .bind(event.organizer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("events_slug_key") {
                    return AppError::Conflict("An event with this title already exists on that date".into());
                }
            }
            AppError::from(e)
        })?;

        self.get_event(id)
            .await?
            .ok_or_else(|| AppError::InternalError("Created event could not be read back".into()))
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let query = format!("{EVENT_SELECT} WHERE e.id = $1");

        let event = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn upcoming_events(&self, from: NaiveDate, limit: i64) -> Result<Vec<Event>, AppError> {
        let query = format!(
            "{EVENT_SELECT} WHERE e.event_date >= $1 \
             ORDER BY e.event_date ASC, e.event_time ASC NULLS LAST LIMIT $2"
        );

        let events = sqlx::query_as::<_, Event>(&query)
            .bind(from)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn past_events(&self, before: NaiveDate, limit: i64) -> Result<Vec<Event>, AppError> {
        let query = format!(
            "{EVENT_SELECT} WHERE e.event_date < $1 \
             ORDER BY e.event_date DESC, e.event_time DESC NULLS LAST LIMIT $2"
        );

        let events = sqlx::query_as::<_, Event>(&query)
            .bind(before)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn register_attendee(&self, event_id: Uuid, user_id: Uuid) -> Result<RegistrationOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent registrations for the same event.
        let max_attendees: Option<Option<i32>> = sqlx::query_scalar(
            "SELECT max_attendees FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(max_attendees) = max_attendees else {
            return Ok(RegistrationOutcome::EventNotFound);
        };

        let already: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM event_registrations WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if already {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        if !has_capacity(max_attendees, count) {
            return Ok(RegistrationOutcome::Full);
        }

        sqlx::query("INSERT INTO event_registrations (event_id, user_id) VALUES ($1, $2)")
            .bind(event_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(RegistrationOutcome::Registered(count + 1))
    }

    async fn cancel_registration(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM event_registrations WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
