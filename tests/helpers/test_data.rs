//! Generated test data

use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use eventsapi::models::CreateUserRequest;

pub const TEST_PASSWORD: &str = "s3cret-Passw0rd";

/// Sign-up input with a unique username and email
pub fn fake_user_request() -> CreateUserRequest {
    let suffix = &uuid::Uuid::new_v4().simple().to_string()[..8];
    let username: String = Username().fake();
    let email: String = SafeEmail().fake();

    CreateUserRequest {
        username: Some(format!("{username}_{suffix}")),
        email: Some(format!("{suffix}.{email}")),
        phone_number: Some("+15551234567".to_string()),
        password: Some(TEST_PASSWORD.to_string()),
    }
}

pub fn user_request(username: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: Some(username.to_string()),
        email: Some(email.to_string()),
        phone_number: Some("+15551234567".to_string()),
        password: Some("pw".to_string()),
    }
}

pub fn fake_feedback() -> String {
    Sentence(3..10).fake()
}
