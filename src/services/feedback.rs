//! Feedback log

use crate::database::repositories::FeedbackRepository;
use crate::models::event::Event;
use crate::models::feedback::{Feedback, FeedbackSummary};
use crate::models::user::User;
use crate::utils::errors::{EventsApiError, Result};
use crate::utils::logging::log_event_action;

#[derive(Debug, Clone)]
pub struct FeedbackService {
    feedback: FeedbackRepository,
}

impl FeedbackService {
    pub fn new(feedback: FeedbackRepository) -> Self {
        Self { feedback }
    }

    /// Record feedback. No moderation or deduplication: every call adds a row.
    pub async fn submit_feedback(&self, user: &User, event: &Event, description: &str) -> Result<Feedback> {
        if description.contains('\0') {
            return Err(EventsApiError::validation("Feedback must not contain NUL bytes"));
        }

        let feedback = self.feedback.create(user.id, event.id, description).await?;
        log_event_action(event.id, "submit_feedback", Some(user.id), None);
        Ok(feedback)
    }

    pub async fn feedback_for_event(&self, event: &Event) -> Result<Vec<FeedbackSummary>> {
        self.feedback.for_event(event.id).await
    }

    pub async fn feedback_by_user(&self, user: &User) -> Result<Vec<Feedback>> {
        self.feedback.by_user(user.id).await
    }
}
