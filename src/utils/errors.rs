//! Error handling for EventsAPI
//!
//! This module defines the error type shared by every store and service,
//! and the translation of database constraint violations into typed errors.

use thiserror::Error;

/// Main error type for EventsAPI operations
#[derive(Error, Debug)]
pub enum EventsApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{field} '{value}' is already taken")]
    Uniqueness { field: &'static str, value: String },

    #[error("User {user_id} is already registered for event {event_id}")]
    DuplicateRegistration { user_id: i64, event_id: i64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for EventsAPI operations
pub type Result<T> = std::result::Result<T, EventsApiError>;

impl From<argon2::password_hash::Error> for EventsApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        EventsApiError::PasswordHash(err.to_string())
    }
}

impl From<config::ConfigError> for EventsApiError {
    fn from(err: config::ConfigError) -> Self {
        EventsApiError::Config(err.to_string())
    }
}

impl EventsApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        EventsApiError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EventsApiError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the caller caused the failure; the API layer maps these to 4xx responses.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EventsApiError::Validation(_)
                | EventsApiError::Uniqueness { .. }
                | EventsApiError::DuplicateRegistration { .. }
                | EventsApiError::NotFound { .. }
                | EventsApiError::Authentication(_)
                | EventsApiError::Token(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventsApiError::Database(_) => ErrorSeverity::Critical,
            EventsApiError::Migration(_) => ErrorSeverity::Critical,
            EventsApiError::Config(_) => ErrorSeverity::Critical,
            EventsApiError::Authentication(_) => ErrorSeverity::Warning,
            EventsApiError::Token(_) => ErrorSeverity::Warning,
            EventsApiError::Validation(_) => ErrorSeverity::Info,
            EventsApiError::Uniqueness { .. } => ErrorSeverity::Info,
            EventsApiError::DuplicateRegistration { .. } => ErrorSeverity::Info,
            EventsApiError::NotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Name of the violated unique constraint, if `err` is a unique violation.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Whether `err` is a foreign key violation (a referenced row is missing).
pub fn foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(EventsApiError::validation("username is required").is_client_error());
        assert!(EventsApiError::not_found("Event", 7).is_client_error());
        assert!(EventsApiError::DuplicateRegistration { user_id: 1, event_id: 2 }.is_client_error());
        assert!(!EventsApiError::Config("missing secret".to_string()).is_client_error());
        assert!(!EventsApiError::Database(sqlx::Error::RowNotFound).is_client_error());
    }

    #[test]
    fn test_severity() {
        assert_eq!(EventsApiError::Database(sqlx::Error::PoolTimedOut).severity(), ErrorSeverity::Critical);
        assert_eq!(EventsApiError::Authentication("bad".into()).severity(), ErrorSeverity::Warning);
        assert_eq!(
            EventsApiError::Uniqueness { field: "email", value: "a@x.com".into() }.severity(),
            ErrorSeverity::Info
        );
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_error_messages() {
        let err = EventsApiError::Uniqueness { field: "username", value: "alice".into() };
        assert_eq!(err.to_string(), "username 'alice' is already taken");

        let err = EventsApiError::not_found("User", 42);
        assert_eq!(err.to_string(), "User not found: 42");
    }

    #[test]
    fn test_non_database_errors_are_not_violations() {
        assert!(unique_violation(&sqlx::Error::RowNotFound).is_none());
        assert!(!foreign_key_violation(&sqlx::Error::RowNotFound));
    }
}
