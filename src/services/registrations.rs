//! Registration ledger
//!
//! One row per (user, event) pair. There is no capacity limit: any number of
//! users may register for any event.

use tracing::warn;
use crate::database::repositories::RegistrationRepository;
use crate::models::event::Event;
use crate::models::registration::EventRegistration;
use crate::models::user::User;
use crate::utils::errors::{EventsApiError, Result};
use crate::utils::logging::log_event_action;

#[derive(Debug, Clone)]
pub struct RegistrationService {
    registrations: RegistrationRepository,
}

impl RegistrationService {
    pub fn new(registrations: RegistrationRepository) -> Self {
        Self { registrations }
    }

    /// Register the user for the event.
    ///
    /// Fails with [`EventsApiError::DuplicateRegistration`] if the pair is
    /// already registered, and [`EventsApiError::NotFound`] if either side no
    /// longer exists.
    pub async fn register(&self, user: &User, event: &Event) -> Result<EventRegistration> {
        let registration = self
            .registrations
            .create(user.id, event.id)
            .await
            .map_err(|err| {
                if let EventsApiError::DuplicateRegistration { .. } = err {
                    warn!(user_id = user.id, event_id = event.id, "Duplicate registration rejected");
                }
                err
            })?;

        log_event_action(event.id, "register", Some(user.id), None);
        Ok(registration)
    }

    /// Remove the user's registration; absent registrations are a `NotFound`
    pub async fn unregister(&self, user: &User, event: &Event) -> Result<()> {
        if !self.registrations.delete(user.id, event.id).await? {
            return Err(EventsApiError::not_found(
                "Registration",
                format!("user {} / event {}", user.id, event.id),
            ));
        }

        log_event_action(event.id, "unregister", Some(user.id), None);
        Ok(())
    }

    pub async fn is_registered(&self, user: &User, event: &Event) -> Result<bool> {
        Ok(self.registrations.find(user.id, event.id).await?.is_some())
    }

    /// Events the user is registered for
    pub async fn events_for_user(&self, user: &User) -> Result<Vec<Event>> {
        self.registrations.events_for_user(user.id).await
    }

    pub async fn registration_count(&self, event: &Event) -> Result<i64> {
        self.registrations.count_for_event(event.id).await
    }

    /// Human-readable form, e.g. `"alice Registered in Hackathon"`
    pub async fn describe(&self, registration: &EventRegistration) -> Result<String> {
        self.registrations
            .summary(registration.id)
            .await?
            .map(|summary| summary.to_string())
            .ok_or_else(|| EventsApiError::not_found("Registration", registration.id))
    }
}
