//! Password hashing
//!
//! Passwords are stored as Argon2id PHC strings with a random per-user salt.
//! Accounts created without a password get an unusable marker instead.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use std::sync::OnceLock;
use crate::utils::errors::Result;

/// Prefix of stored values that no password can match
pub const UNUSABLE_PASSWORD_PREFIX: char = '!';
const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

/// Hash a raw password with a freshly generated salt
pub fn hash_password(raw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(raw.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a raw password against a stored hash.
///
/// Unusable markers and malformed hashes never match.
pub fn verify_password(raw: &str, stored: &str) -> bool {
    if !is_password_usable(stored) {
        return false;
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Run a full Argon2 verification that always fails.
///
/// Used when there is no stored hash to check against, so a missing account
/// costs the same time as a wrong password.
pub fn verify_dummy_password(raw: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    let dummy = DUMMY_HASH.get_or_init(|| hash_password(&make_unusable_password()).ok());

    if let Some(hash) = dummy {
        let _ = verify_password(raw, hash);
    }
    false
}

/// A stored value that cannot be matched by any password
pub fn make_unusable_password() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNUSABLE_PASSWORD_SUFFIX_LENGTH)
        .map(char::from)
        .collect();
    format!("{}{}", UNUSABLE_PASSWORD_PREFIX, suffix)
}

pub fn is_password_usable(stored: &str) -> bool {
    !stored.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let first = hash_password("pw").unwrap();
        let second = hash_password("pw").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("pw", &first));
        assert!(verify_password("pw", &second));
    }

    #[test]
    fn test_unusable_password() {
        let marker = make_unusable_password();
        assert!(!is_password_usable(&marker));
        assert_eq!(marker.len(), 1 + UNUSABLE_PASSWORD_SUFFIX_LENGTH);
        assert!(!verify_password("", &marker));
        assert!(!verify_password(&marker, &marker));
    }

    #[test]
    fn test_dummy_password_never_matches() {
        assert!(!verify_dummy_password("pw"));
        assert!(!verify_dummy_password(""));
        assert!(!verify_dummy_password(&make_unusable_password()));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("pw", "pw"));
        assert!(!verify_password("", ""));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn hash_never_contains_plaintext(raw in "[a-zA-Z0-9]{8,24}") {
            let hash = hash_password(&raw).unwrap();
            prop_assert!(!hash.contains(&raw));
            prop_assert!(verify_password(&raw, &hash));
        }
    }
}
