//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the structure of their corresponding domain types
//! but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Given name; serialised as `firstName`.
    #[schema(example = "John")]
    first_name: String,
    /// Family name; serialised as `lastName`.
    #[schema(example = "Doe")]
    last_name: String,
    /// Between one and three unique email addresses.
    emails: Vec<String>,
    /// Date of birth in `YYYY-MM-DD` format.
    #[schema(example = "1990-01-01")]
    dob: String,
}

/// OpenAPI schema for [`crate::domain::FieldError`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Human-readable description of the violation.
    #[schema(example = "Invalid email format")]
    message: String,
    /// Location of the offending value: member names and sequence indexes.
    path: Option<Vec<serde_json::Value>>,
    /// Offending member names for unrecognised-key findings.
    keys: Option<Vec<String>>,
}

/// Success envelope wrapping a user payload.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserEnvelopeSchema {
    #[schema(example = "success")]
    status: String,
    data: UserSchema,
}

/// Error envelope returned for every failed request.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = "error")]
    status: String,
    #[schema(example = "Invalid payload")]
    message: String,
    errors: Option<Vec<FieldErrorSchema>>,
}
