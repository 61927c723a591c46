//! Database service layer
//!
//! Bundles the repositories over one shared connection pool.

use serde::Serialize;
use crate::database::{DatabasePool, UserRepository, EventRepository, RegistrationRepository, FeedbackRepository};
use crate::utils::errors::EventsApiError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pub feedback: FeedbackRepository,
}

/// Row counts across the main tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemStats {
    pub users: i64,
    pub events: i64,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            feedback: FeedbackRepository::new(pool),
        }
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<SystemStats, EventsApiError> {
        Ok(SystemStats {
            users: self.users.count().await?,
            events: self.events.count().await?,
        })
    }
}
