//! Data models module
//!
//! This module contains all data structures persisted by the stores

pub mod user;
pub mod event;
pub mod registration;
pub mod feedback;

// Re-export commonly used models
pub use user::{User, CreateUserRequest, NewUser};
pub use event::{Event, CreateEventRequest};
pub use registration::{EventRegistration, RegistrationSummary};
pub use feedback::{Feedback, FeedbackSummary};
