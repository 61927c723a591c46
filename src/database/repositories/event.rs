//! Event repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::event::{Event, CreateEventRequest};
use crate::models::user::User;
use crate::utils::errors::{unique_violation, EventsApiError};

#[derive(Clone)]
#[derive(Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event; a taken name surfaces as [`EventsApiError::Uniqueness`]
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, EventsApiError> {
        let result = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, created_at)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#
        )
        .bind(&request.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        result.map_err(|err| match unique_violation(&err).as_deref() {
            Some("events_name_key") => EventsApiError::Uniqueness {
                field: "name",
                value: request.name.clone(),
            },
            _ => EventsApiError::Database(err),
        })
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventsApiError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, created_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by its unique name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Event>, EventsApiError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, created_at FROM events WHERE name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event; registrations and feedback go with it via `ON DELETE CASCADE`.
    pub async fn delete(&self, id: i64) -> Result<bool, EventsApiError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List events with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>, EventsApiError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, name, created_at FROM events ORDER BY name ASC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Users registered for the event
    pub async fn registered_users(&self, event_id: i64) -> Result<Vec<User>, EventsApiError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.phone_number, u.password, u.is_active, u.is_staff, u.is_superuser, u.is_verified, u.otp, u.last_login, u.created_at, u.updated_at
            FROM users u
            INNER JOIN event_registrations er ON u.id = er.user_id
            WHERE er.event_id = $1
            ORDER BY er.registered_at ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, EventsApiError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
