//! Event catalog

use tracing::debug;
use crate::database::repositories::EventRepository;
use crate::models::event::{CreateEventRequest, Event};
use crate::models::user::User;
use crate::utils::errors::{EventsApiError, Result};
use crate::utils::helpers::{fits_column, is_blank, MAX_NAME_LENGTH};
use crate::utils::logging::log_event_action;

#[derive(Debug, Clone)]
pub struct EventService {
    events: EventRepository,
}

impl EventService {
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    /// Create an event; names are unique across the catalog
    pub async fn create_event(&self, name: &str) -> Result<Event> {
        if is_blank(Some(name)) {
            return Err(EventsApiError::validation("Events should have a name"));
        }
        if !fits_column(name, MAX_NAME_LENGTH) {
            return Err(EventsApiError::validation(format!(
                "Event name must be at most {} characters and contain no NUL bytes",
                MAX_NAME_LENGTH
            )));
        }

        let event = self
            .events
            .create(CreateEventRequest { name: name.to_string() })
            .await?;

        log_event_action(event.id, "create_event", None, Some(event.name.as_str()));
        Ok(event)
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        debug!(event_id = event_id, "Getting event by ID");
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| EventsApiError::not_found("Event", event_id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Event>> {
        self.events.find_by_name(name).await
    }

    pub async fn list_events(&self, limit: i64, offset: i64) -> Result<Vec<Event>> {
        self.events.list(limit, offset).await
    }

    /// Users registered for the event, in no particular order
    pub async fn list_registered_users(&self, event: &Event) -> Result<Vec<User>> {
        self.events.registered_users(event.id).await
    }

    /// Delete the event together with its registrations and feedback
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        if !self.events.delete(event_id).await? {
            return Err(EventsApiError::not_found("Event", event_id));
        }

        log_event_action(event_id, "delete_event", None, None);
        Ok(())
    }
}
