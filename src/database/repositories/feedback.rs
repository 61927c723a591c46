//! Feedback repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::feedback::{Feedback, FeedbackSummary};
use crate::utils::errors::{foreign_key_violation, EventsApiError};

#[derive(Clone)]
#[derive(Debug)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a feedback row
    pub async fn create(&self, user_id: i64, event_id: i64, description: &str) -> Result<Feedback, EventsApiError> {
        let result = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (event_id, user_id, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, user_id, description, created_at
            "#
        )
        .bind(event_id)
        .bind(user_id)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        result.map_err(|err| {
            if foreign_key_violation(&err) {
                EventsApiError::not_found("User or event", format!("user {} / event {}", user_id, event_id))
            } else {
                EventsApiError::Database(err)
            }
        })
    }

    /// Feedback left on an event, with author names
    pub async fn for_event(&self, event_id: i64) -> Result<Vec<FeedbackSummary>, EventsApiError> {
        let feedback = sqlx::query_as::<_, FeedbackSummary>(
            r#"
            SELECT f.id, e.name AS event_name, u.username, f.description, f.created_at
            FROM feedback f
            INNER JOIN users u ON u.id = f.user_id
            INNER JOIN events e ON e.id = f.event_id
            WHERE f.event_id = $1
            ORDER BY f.created_at ASC, f.id ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Feedback written by a user
    pub async fn by_user(&self, user_id: i64) -> Result<Vec<Feedback>, EventsApiError> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, event_id, user_id, description, created_at FROM feedback WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Count feedback rows written by a user
    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, EventsApiError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
