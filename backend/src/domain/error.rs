//! Domain-level error types.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps them to
//! status codes and the fixed response envelope; nothing in the domain layer
//! constructs an HTTP response.

use serde::{Deserialize, Serialize};

/// Stable machine-readable classification of a failure.
///
/// The classification decides the HTTP status the inbound adapter responds
/// with; the client-facing body carries only the message and field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request body failed schema validation or carries a contradictory id.
    InvalidPayload,
    /// The addressed user record does not exist.
    NotFound,
    /// A record with the same id already exists.
    AlreadyExists,
    /// The update would drop an email address from the stored record.
    EmailDeletion,
    /// No route matches the request.
    RouteNotFound,
    /// An unexpected failure inside the service or its collaborators.
    Internal,
}

/// One segment of the location of a field error inside the payload.
///
/// Object members are addressed by key, sequence elements by index, so a
/// bad second email serialises as `["emails", 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object member name.
    Key(String),
    /// A position within a sequence.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// A single validation finding tied to a location in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Human-readable description of the violation.
    pub message: String,
    /// Location of the offending value, when one can be named.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Offending member names for unrecognised-key findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl FieldError {
    /// A finding without a location, e.g. a payload that is not an object.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            keys: None,
        }
    }

    /// A finding located at a top-level member.
    pub fn at_key(message: impl Into<String>, key: &str) -> Self {
        Self {
            message: message.into(),
            path: Some(vec![PathSegment::from(key)]),
            keys: None,
        }
    }

    /// A finding located at an element of a top-level sequence member.
    pub fn at_index(message: impl Into<String>, key: &str, index: usize) -> Self {
        Self {
            message: message.into(),
            path: Some(vec![PathSegment::from(key), PathSegment::from(index)]),
            keys: None,
        }
    }

    /// Attach the offending member names.
    #[must_use]
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = Some(keys);
        self
    }
}

/// Domain error carried through the request pipeline.
///
/// Every stage forwards failures as values; the terminal translation into an
/// HTTP response happens exactly once, in the inbound adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    errors: Option<Vec<FieldError>>,
}

impl Error {
    /// Create an error with an explicit classification and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Attach the structured field-error list.
    #[must_use]
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Schema validation failed; carries the structured findings.
    pub fn invalid_payload(errors: Vec<FieldError>) -> Self {
        Self::new(ErrorCode::InvalidPayload, "Invalid payload").with_field_errors(errors)
    }

    /// The addressed user does not exist.
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::NotFound, "User not found")
    }

    /// A create collided with an existing record.
    pub fn user_already_exists() -> Self {
        Self::new(ErrorCode::AlreadyExists, "A user with the same id already exists")
    }

    /// No route matches the request.
    pub fn route_not_found() -> Self {
        Self::new(ErrorCode::RouteNotFound, "Route not found")
    }

    /// Unexpected failure; the message is surfaced to the client verbatim.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Stable machine-readable classification.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Structured field errors accompanying a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        self.errors.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn path_segments_serialise_as_strings_and_numbers() {
        let finding = FieldError::at_index("Invalid email format", "emails", 1);
        let value = serde_json::to_value(&finding).expect("field error serialises");
        assert_eq!(
            value,
            json!({ "message": "Invalid email format", "path": ["emails", 1] })
        );
    }

    #[test]
    fn absent_path_and_keys_are_omitted() {
        let finding = FieldError::new("Payload must be a JSON object");
        let value = serde_json::to_value(&finding).expect("field error serialises");
        assert_eq!(value, json!({ "message": "Payload must be a JSON object" }));
    }

    #[test]
    fn keys_round_trip() {
        let finding = FieldError::new("Unrecognized key(s) in object: 'nickname'")
            .with_keys(vec!["nickname".to_owned()]);
        let value = serde_json::to_value(&finding).expect("field error serialises");
        assert_eq!(value.get("keys"), Some(&json!(["nickname"])));
        let parsed: FieldError = serde_json::from_value(value).expect("field error parses");
        assert_eq!(parsed, finding);
    }

    #[test]
    fn convenience_constructors_pick_fixed_messages() {
        assert_eq!(Error::user_not_found().message(), "User not found");
        assert_eq!(
            Error::user_already_exists().message(),
            "A user with the same id already exists"
        );
        assert_eq!(Error::route_not_found().message(), "Route not found");
        assert_eq!(Error::user_not_found().code(), ErrorCode::NotFound);
    }

    #[test]
    fn internal_errors_keep_the_underlying_text() {
        let err = Error::internal("connection reset by peer");
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[test]
    fn field_errors_are_attached_and_readable() {
        let err = Error::invalid_payload(vec![FieldError::at_key(
            "First name is required",
            "firstName",
        )]);
        assert_eq!(err.message(), "Invalid payload");
        let findings = err.field_errors().expect("findings present");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "First name is required");
        let _: Value = serde_json::to_value(findings).expect("findings serialise");
    }
}
