//! Field-level validation for onboarding requests.
//!
//! Serde already rejects missing fields and wrong JSON types. This module
//! covers the constraints serde cannot express: non-blank text and email
//! syntax. All failures are collected so callers can report every bad field
//! at once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::types::NetworkRequest;

lazy_static! {
    /// Email address pattern (RFC 5322 dot-atom local part, hostname labels, anchored)
    static ref EMAIL_PATTERN: Regex = Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    ))
    .unwrap();
}

/// A single field that failed validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field failure found in a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", join_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check if a string is a syntactically valid email address.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

impl NetworkRequest {
    /// Validate the constraints that deserialization cannot enforce.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.company_name.trim().is_empty() {
            errors.push(FieldError::new("company_name", "must not be empty"));
        }

        if self.industry.trim().is_empty() {
            errors.push(FieldError::new("industry", "must not be empty"));
        }

        if !is_valid_email(&self.contact_email) {
            errors.push(FieldError::new(
                "contact_email",
                "value is not a valid email address",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}
