//! Schema validation for user payloads.
//!
//! The schema is expressed as an explicit ordered set of field rules over the
//! raw JSON value rather than a derived deserialiser, because the exact
//! messages and paths below are part of the API contract and must not drift
//! with a serialisation library's wording. Validation is pure: it never
//! performs I/O and reports expected violations as values, collecting every
//! simultaneous finding instead of stopping at the first.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::FieldError;
use super::user::User;

/// A user must keep at least this many email addresses.
pub const MIN_EMAILS: usize = 1;
/// A user may hold at most this many email addresses.
pub const MAX_EMAILS: usize = 3;

const KNOWN_KEYS: [&str; 5] = ["id", "firstName", "lastName", "emails", "dob"];

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn date_regex() -> &'static Regex {
    DATE_RE.get_or_init(|| {
        // Shape only; calendar validity is checked with a chrono parse.
        let pattern = r"^\d{4}-\d{2}-\d{2}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("date regex failed to compile: {error}"))
    })
}

/// Knobs for flows that relax parts of the schema.
///
/// Creation flows may accept a payload without an `id` and generate one; every
/// other field is always required because updates are full replacements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    id_optional: bool,
}

impl ValidateOptions {
    /// The strict default: every field required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the payload to omit `id`.
    #[must_use]
    pub fn with_optional_id(mut self) -> Self {
        self.id_optional = true;
        self
    }
}

/// Normalised outcome of a successful validation pass.
///
/// `id` is `None` only when [`ValidateOptions::with_optional_id`] allowed the
/// payload to omit it; [`UserPayload::into_user`] completes the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    pub dob: NaiveDate,
}

impl UserPayload {
    /// Complete the payload into a [`User`], failing when the id is absent.
    pub fn into_user(self) -> Result<User, Vec<FieldError>> {
        let Self {
            id,
            first_name,
            last_name,
            emails,
            dob,
        } = self;
        let Some(id) = id else {
            return Err(vec![FieldError::at_key("The id field is required", "id")]);
        };
        Ok(User {
            id,
            first_name,
            last_name,
            emails,
            dob,
        })
    }
}

/// Validate a raw payload against the user schema.
///
/// Returns the normalised payload, or every violation found. The payload must
/// be a strict object: unrecognised members are reported rather than dropped.
pub fn validate(payload: &Value, options: &ValidateOptions) -> Result<UserPayload, Vec<FieldError>> {
    let Some(object) = payload.as_object() else {
        return Err(vec![FieldError::new("Payload must be a JSON object")]);
    };

    let mut errors = Vec::new();
    check_unrecognized_keys(object, &mut errors);
    let id = check_id(object, options, &mut errors);
    let first_name = check_person_name(object, "firstName", "First name", &mut errors);
    let last_name = check_person_name(object, "lastName", "Last name", &mut errors);
    let emails = check_emails(object, &mut errors);
    let dob = check_dob(object, &mut errors);

    if errors.is_empty() {
        if let (Some(first_name), Some(last_name), Some(emails), Some(dob)) =
            (first_name, last_name, emails, dob)
        {
            return Ok(UserPayload {
                id,
                first_name,
                last_name,
                emails,
                dob,
            });
        }
    }
    Err(errors)
}

fn check_unrecognized_keys(object: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    let unknown: Vec<String> = object
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    if unknown.is_empty() {
        return;
    }
    let listed = unknown
        .iter()
        .map(|key| format!("'{key}'"))
        .collect::<Vec<_>>()
        .join(", ");
    errors.push(
        FieldError::new(format!("Unrecognized key(s) in object: {listed}")).with_keys(unknown),
    );
}

fn check_id(
    object: &Map<String, Value>,
    options: &ValidateOptions,
    errors: &mut Vec<FieldError>,
) -> Option<Uuid> {
    match object.get("id") {
        None => {
            if !options.id_optional {
                errors.push(FieldError::at_key("The id field is required", "id"));
            }
            None
        }
        Some(Value::String(raw)) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::at_key("The id needs to be a valid UUID", "id"));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::at_key("The id needs to be a valid UUID", "id"));
            None
        }
    }
}

fn check_person_name(
    object: &Map<String, Value>,
    key: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Some(value.clone()),
        Some(Value::String(_)) => {
            errors.push(FieldError::at_key(
                format!("{label} cannot be an empty string"),
                key,
            ));
            None
        }
        _ => {
            errors.push(FieldError::at_key(format!("{label} is required"), key));
            None
        }
    }
}

fn check_emails(object: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Vec<String>> {
    let Some(entries) = object.get("emails").and_then(Value::as_array) else {
        errors.push(FieldError::at_key("The emails field is required", "emails"));
        return None;
    };

    let mut countable = true;
    if entries.len() < MIN_EMAILS {
        errors.push(FieldError::at_key(
            "A user must have at least 1 email address",
            "emails",
        ));
        countable = false;
    }
    if entries.len() > MAX_EMAILS {
        errors.push(FieldError::at_key(
            "A user can have at most 3 email addresses",
            "emails",
        ));
        countable = false;
    }

    let mut emails = Vec::with_capacity(entries.len());
    let mut well_formed = true;
    for (index, entry) in entries.iter().enumerate() {
        match entry.as_str() {
            Some(raw) if email_regex().is_match(raw) => emails.push(raw.to_owned()),
            _ => {
                errors.push(FieldError::at_index("Invalid email format", "emails", index));
                well_formed = false;
            }
        }
    }

    // Uniqueness is judged over the entries that parsed as strings; a
    // malformed entry does not mask a duplicate elsewhere in the list.
    let mut seen = HashSet::new();
    let duplicated = entries
        .iter()
        .filter_map(Value::as_str)
        .any(|raw| !seen.insert(raw));
    if duplicated {
        errors.push(FieldError::at_key("All the emails must be unique", "emails"));
    }

    (countable && well_formed && !duplicated).then_some(emails)
}

fn check_dob(object: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let Some(raw) = object.get("dob").and_then(Value::as_str) else {
        errors.push(FieldError::at_key("Date of birth is required", "dob"));
        return None;
    };
    if date_regex().is_match(raw) {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
    }
    errors.push(FieldError::at_key(
        "dob must be in the format YYYY-MM-DD",
        "dob",
    ));
    None
}
