//! EventsAPI core
//!
//! Persistence and authentication core for an event registration service:
//! user accounts with token-based authentication, an event catalog, the
//! user/event registration ledger and a free-text feedback log. The HTTP
//! layer lives elsewhere and calls into [`ServiceFactory`].

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventsApiError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
