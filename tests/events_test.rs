//! Event catalog, registration ledger and feedback log integration tests

mod helpers;

use assert_matches::assert_matches;
use eventsapi::EventsApiError;
use helpers::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_create_event_unique_name() {
    let Some(ctx) = TestContext::new().await else { return };
    let events = &ctx.services.events;

    let hackathon = events.create_event("Hackathon").await.unwrap();
    assert_eq!(hackathon.name, "Hackathon");
    assert_eq!(hackathon.to_string(), "Hackathon");

    let result = events.create_event("Hackathon").await;
    assert_matches!(result, Err(EventsApiError::Uniqueness { field: "name", .. }));
    assert_eq!(ctx.db.count("events").await, 1);

    assert_matches!(events.create_event("   ").await, Err(EventsApiError::Validation(_)));
}

#[tokio::test]
#[serial]
async fn test_event_lookup_and_listing() {
    let Some(ctx) = TestContext::new().await else { return };
    let events = &ctx.services.events;

    let workshop = events.create_event("Workshop").await.unwrap();
    events.create_event("Conference").await.unwrap();

    assert_eq!(events.get_event(workshop.id).await.unwrap(), workshop);
    assert_eq!(events.find_by_name("Workshop").await.unwrap(), Some(workshop.clone()));
    assert!(events.find_by_name("Meetup").await.unwrap().is_none());
    assert_matches!(events.get_event(workshop.id + 100).await, Err(EventsApiError::NotFound { .. }));

    let names: Vec<String> = events
        .list_events(10, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|event| event.name)
        .collect();
    assert_eq!(names, vec!["Conference", "Workshop"]);
}

#[tokio::test]
#[serial]
async fn test_register_and_list_registered_users() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let alice = services.identity.create_user(user_request("alice", "alice@x.com")).await.unwrap();
    let hackathon = services.events.create_event("Hackathon").await.unwrap();

    let registration = services.registrations.register(&alice, &hackathon).await.unwrap();
    assert_eq!(registration.user_id, alice.id);
    assert_eq!(registration.event_id, hackathon.id);

    let users = services.events.list_registered_users(&hackathon).await.unwrap();
    let usernames: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(usernames, vec!["alice"]);

    assert!(services.registrations.is_registered(&alice, &hackathon).await.unwrap());
    assert_eq!(
        services.registrations.describe(&registration).await.unwrap(),
        "alice Registered in Hackathon"
    );
}

#[tokio::test]
#[serial]
async fn test_duplicate_registration_rejected() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let alice = services.identity.create_user(fake_user_request()).await.unwrap();
    let hackathon = services.events.create_event("Hackathon").await.unwrap();

    services.registrations.register(&alice, &hackathon).await.unwrap();
    let result = services.registrations.register(&alice, &hackathon).await;

    assert_matches!(
        result,
        Err(EventsApiError::DuplicateRegistration { user_id, event_id })
            if user_id == alice.id && event_id == hackathon.id
    );
    assert_eq!(services.registrations.registration_count(&hackathon).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_many_users_one_event() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let festival = services.events.create_event("Festival").await.unwrap();
    for _ in 0..5 {
        let user = services.identity.create_user(fake_user_request()).await.unwrap();
        services.registrations.register(&user, &festival).await.unwrap();
    }

    assert_eq!(services.events.list_registered_users(&festival).await.unwrap().len(), 5);
}

#[tokio::test]
#[serial]
async fn test_unregister() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let bob = services.identity.create_user(fake_user_request()).await.unwrap();
    let meetup = services.events.create_event("Meetup").await.unwrap();
    let talk = services.events.create_event("Talk").await.unwrap();

    services.registrations.register(&bob, &meetup).await.unwrap();
    services.registrations.register(&bob, &talk).await.unwrap();
    assert_eq!(services.registrations.events_for_user(&bob).await.unwrap().len(), 2);

    services.registrations.unregister(&bob, &meetup).await.unwrap();
    assert!(!services.registrations.is_registered(&bob, &meetup).await.unwrap());
    assert_eq!(services.registrations.events_for_user(&bob).await.unwrap(), vec![talk]);

    assert_matches!(
        services.registrations.unregister(&bob, &meetup).await,
        Err(EventsApiError::NotFound { .. })
    );

    // Registering again after leaving is allowed
    services.registrations.register(&bob, &meetup).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_register_for_deleted_event() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let user = services.identity.create_user(fake_user_request()).await.unwrap();
    let event = services.events.create_event("Cancelled").await.unwrap();
    services.events.delete_event(event.id).await.unwrap();

    assert_matches!(
        services.registrations.register(&user, &event).await,
        Err(EventsApiError::NotFound { .. })
    );
    assert_matches!(services.events.delete_event(event.id).await, Err(EventsApiError::NotFound { .. }));
}

#[tokio::test]
#[serial]
async fn test_feedback_allows_multiple_entries() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let alice = services.identity.create_user(user_request("alice", "alice@x.com")).await.unwrap();
    let hackathon = services.events.create_event("Hackathon").await.unwrap();

    let first_text = fake_feedback();
    let first = services.feedback.submit_feedback(&alice, &hackathon, &first_text).await.unwrap();
    let second = services.feedback.submit_feedback(&alice, &hackathon, &first_text).await.unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.description, first_text);

    let entries = services.feedback.feedback_for_event(&hackathon).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].to_string(), "Hackathon By alice");

    assert_eq!(services.feedback.feedback_by_user(&alice).await.unwrap(), vec![first, second]);
}

#[tokio::test]
#[serial]
async fn test_feedback_does_not_require_registration() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let user = services.identity.create_user(fake_user_request()).await.unwrap();
    let event = services.events.create_event("Open Day").await.unwrap();

    services.feedback.submit_feedback(&user, &event, "").await.unwrap();
    assert!(!services.registrations.is_registered(&user, &event).await.unwrap());
}

#[tokio::test]
#[serial]
async fn test_unstorable_event_name_is_validation_error() {
    let Some(ctx) = TestContext::new().await else { return };
    let events = &ctx.services.events;

    let err = events.create_event(&"a".repeat(300)).await.unwrap_err();
    assert_matches!(err, EventsApiError::Validation(_));
    assert!(err.is_client_error());

    assert_matches!(events.create_event("nul\0event").await, Err(EventsApiError::Validation(_)));
    assert_eq!(ctx.db.count("events").await, 0);

    let longest = "é".repeat(255);
    assert_eq!(events.create_event(&longest).await.unwrap().name, longest);
}

#[tokio::test]
#[serial]
async fn test_feedback_with_nul_byte_rejected() {
    let Some(ctx) = TestContext::new().await else { return };
    let services = &ctx.services;

    let user = services.identity.create_user(fake_user_request()).await.unwrap();
    let event = services.events.create_event("Open Day").await.unwrap();

    let result = services.feedback.submit_feedback(&user, &event, "great\0talk").await;
    assert_matches!(result, Err(EventsApiError::Validation(_)));
    assert_eq!(ctx.db.count("feedback").await, 0);
}
