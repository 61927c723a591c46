//! Services module
//!
//! This module contains the business logic the API layer calls into

pub mod events;
pub mod feedback;
pub mod identity;
pub mod password;
pub mod registrations;
pub mod tokens;

// Re-export commonly used services
pub use events::EventService;
pub use feedback::FeedbackService;
pub use identity::{Authenticatable, IdentityService};
pub use registrations::RegistrationService;
pub use tokens::{Claims, TokenPair, TokenService, TokenType};

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub identity: IdentityService,
    pub events: EventService,
    pub registrations: RegistrationService,
    pub feedback: FeedbackService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: &Settings) -> Self {
        let tokens = TokenService::from_config(&settings.auth);

        Self {
            identity: IdentityService::new(database.users, tokens),
            events: EventService::new(database.events),
            registrations: RegistrationService::new(database.registrations),
            feedback: FeedbackService::new(database.feedback),
        }
    }
}
