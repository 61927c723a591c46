//! Feedback model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Feedback joined with the names of its event and author
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackSummary {
    pub id: i64,
    pub event_name: String,
    pub username: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for FeedbackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} By {}", self.event_name, self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_feedback_summary_display() {
        let summary = FeedbackSummary {
            id: 1,
            event_name: "Hackathon".to_string(),
            username: "alice".to_string(),
            description: "Great venue".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(summary.to_string(), "Hackathon By alice");
    }
}
