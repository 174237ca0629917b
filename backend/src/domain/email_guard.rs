//! Mutation guard enforcing the email-retention invariant.
//!
//! Email addresses may be added to a user but never removed. The guard runs
//! after schema validation, against the record fetched earlier in the same
//! request, and only protects against removal; counting and uniqueness are
//! the validator's responsibility.

use std::collections::HashSet;

use thiserror::Error;

use super::error::{Error, ErrorCode};
use super::user::User;

/// The incoming update would drop an email address from the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Deleting an email address is not allowed")]
pub struct EmailRetentionError;

impl From<EmailRetentionError> for Error {
    fn from(value: EmailRetentionError) -> Self {
        Self::new(ErrorCode::EmailDeletion, value.to_string())
    }
}

/// Check that every stored email address survives into the incoming record.
pub fn check_email_retention(existing: &User, incoming: &User) -> Result<(), EmailRetentionError> {
    let incoming_set: HashSet<&str> = incoming.emails.iter().map(String::as_str).collect();
    let retained = existing
        .emails
        .iter()
        .all(|email| incoming_set.contains(email.as_str()));
    if retained { Ok(()) } else { Err(EmailRetentionError) }
}
