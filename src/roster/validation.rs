//! # Field Validation
//!
//! Checks a [`MemberFields`] value before it is handed to the store.
//!
//! The checks run in a fixed order and every failure is collected:
//!
//! 1. first name blank after trimming
//! 2. last name blank after trimming
//! 3. postal code not exactly five ASCII digits
//! 4. email not a syntactically valid mail address
//!
//! Callers that want fail-fast reporting show [`ValidationErrors::first`],
//! which is also what the `Display` impl prints. Address and phone are free
//! text and never checked.

use crate::model::MemberFields;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use validator::ValidateEmail;

static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("postal code pattern is valid"));

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldError {
    FirstNameMissing,
    LastNameMissing,
    InvalidPostalCode,
    InvalidEmail,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::FirstNameMissing => "First name missing.",
            FieldError::LastNameMissing => "Last name missing.",
            FieldError::InvalidPostalCode => "Invalid postal code.",
            FieldError::InvalidEmail => "Invalid email.",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered, non-empty list of field failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The failure a fail-fast check would have reported.
    pub fn first(&self) -> FieldError {
        self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: FieldError) -> bool {
        self.0.contains(&error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate(fields: &MemberFields) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if fields.first_name.trim().is_empty() {
        errors.push(FieldError::FirstNameMissing);
    }
    if fields.last_name.trim().is_empty() {
        errors.push(FieldError::LastNameMissing);
    }
    if !is_valid_postal_code(&fields.postal_code) {
        errors.push(FieldError::InvalidPostalCode);
    }
    if !is_valid_email(&fields.email) {
        errors.push(FieldError::InvalidEmail);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

pub fn is_valid_postal_code(code: &str) -> bool {
    POSTAL_CODE.is_match(code)
}

pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}
