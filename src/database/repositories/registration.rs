//! Event registration repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::event::Event;
use crate::models::registration::{EventRegistration, RegistrationSummary};
use crate::utils::errors::{foreign_key_violation, unique_violation, EventsApiError};

#[derive(Clone)]
#[derive(Debug)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a user for an event
    ///
    /// The `(event_id, user_id)` unique constraint makes concurrent duplicate
    /// inserts resolve to exactly one row.
    pub async fn create(&self, user_id: i64, event_id: i64) -> Result<EventRegistration, EventsApiError> {
        let result = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations (event_id, user_id, registered_at)
            VALUES ($1, $2, $3)
            RETURNING id, event_id, user_id, registered_at
            "#
        )
        .bind(event_id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        result.map_err(|err| {
            if unique_violation(&err).as_deref() == Some("event_registrations_event_user_key") {
                EventsApiError::DuplicateRegistration { user_id, event_id }
            } else if foreign_key_violation(&err) {
                EventsApiError::not_found("User or event", format!("user {} / event {}", user_id, event_id))
            } else {
                EventsApiError::Database(err)
            }
        })
    }

    /// Remove a registration; returns whether one existed
    pub async fn delete(&self, user_id: i64, event_id: i64) -> Result<bool, EventsApiError> {
        let result = sqlx::query("DELETE FROM event_registrations WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find the registration for a (user, event) pair
    pub async fn find(&self, user_id: i64, event_id: i64) -> Result<Option<EventRegistration>, EventsApiError> {
        let registration = sqlx::query_as::<_, EventRegistration>(
            "SELECT id, event_id, user_id, registered_at FROM event_registrations WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Registration with both parent names, for display
    pub async fn summary(&self, registration_id: i64) -> Result<Option<RegistrationSummary>, EventsApiError> {
        let summary = sqlx::query_as::<_, RegistrationSummary>(
            r#"
            SELECT er.id, u.username, e.name AS event_name, er.registered_at
            FROM event_registrations er
            INNER JOIN users u ON u.id = er.user_id
            INNER JOIN events e ON e.id = er.event_id
            WHERE er.id = $1
            "#
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Events the user is registered for
    pub async fn events_for_user(&self, user_id: i64) -> Result<Vec<Event>, EventsApiError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.name, e.created_at
            FROM events e
            INNER JOIN event_registrations er ON e.id = er.event_id
            WHERE er.user_id = $1
            ORDER BY er.registered_at ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count registrations for an event
    pub async fn count_for_event(&self, event_id: i64) -> Result<i64, EventsApiError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count registrations held by a user
    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, EventsApiError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_registrations WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
