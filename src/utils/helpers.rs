//! Helper functions and utilities
//!
//! Input canonicalization shared by the stores: email normalization,
//! phone number validation, blank checks and column limits.

use regex::Regex;
use std::sync::OnceLock;

/// Character limit of the `VARCHAR(255)` name and email columns
pub const MAX_NAME_LENGTH: usize = 255;

/// Phone numbers: optional leading `+`, then 7 to 15 digits (E.164 length limits).
const PHONE_PATTERN: &str = r"^\+?[0-9]{7,15}$";

fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
}

/// Normalize an email address.
///
/// Surrounding whitespace is removed and the domain part is lowercased.
/// The local part is kept as given, since mailbox names may be case sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Validate email format (basic validation)
pub fn is_valid_email(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Strip the usual visual separators from a phone number.
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect()
}

/// Validate phone number format after separators are stripped
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(&normalize_phone_number(phone))
}

/// True when the value is missing or contains only whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Postgres text cannot hold NUL, and `VARCHAR(n)` counts characters, not bytes.
pub fn fits_column(value: &str, max_chars: usize) -> bool {
    !value.contains('\0') && value.chars().count() <= max_chars
}
