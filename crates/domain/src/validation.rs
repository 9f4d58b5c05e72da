//! Field validation rules shared by entities and request DTOs

use regex::Regex;

use hrdocs_common::{Error, Result};

pub const NAME_MAX_LEN: usize = 100;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const REASON_MAX_LEN: usize = 255;

lazy_static::lazy_static! {
    /// Usernames: letters, digits, dot, underscore, hyphen
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap();
}

/// Validate a username according to the rules
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) && USERNAME_REGEX.is_match(username)
}

/// Validate a first or last name (1-100 characters, not blank)
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    let len = value.chars().count();
    if value.trim().is_empty() || len > NAME_MAX_LEN {
        return Err(Error::Validation(format!(
            "{} must be 1-{} characters",
            field, NAME_MAX_LEN
        )));
    }
    Ok(())
}

/// Validate a contract event reason (1-255 characters, not blank)
pub fn validate_reason(reason: &str) -> Result<()> {
    if reason.trim().is_empty() || reason.chars().count() > REASON_MAX_LEN {
        return Err(Error::Validation(format!(
            "Reason must be 1-{} characters",
            REASON_MAX_LEN
        )));
    }
    Ok(())
}
