//! Event registration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;

/// Join row linking one user to one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventRegistration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub registered_at: DateTime<Utc>,
}

/// Registration joined with the names of both parents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistrationSummary {
    pub id: i64,
    pub username: String,
    pub event_name: String,
    pub registered_at: DateTime<Utc>,
}

impl fmt::Display for RegistrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Registered in {}", self.username, self.event_name)
    }
}
