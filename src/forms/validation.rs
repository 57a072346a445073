use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A message attached to one form field.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
    })
}

/// Local part, `@`, and a dotted domain with no empty labels.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::new("email", "Email is required"));
    }
    if !email_regex().is_match(value) {
        return Err(FieldError::new("email", "Please enter a valid email address"));
    }
    Ok(())
}

pub fn require(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, format!("{} is required", field)));
    }
    Ok(())
}
