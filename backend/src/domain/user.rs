//! User data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application user.
///
/// ## Invariants
/// - `first_name` and `last_name` are non-empty.
/// - `emails` holds between one and three syntactically valid, pairwise
///   distinct addresses.
///
/// Instances are only produced by the validator or read back from the store,
/// so the invariants hold for every value that reaches the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Stable identifier; doubles as the storage primary key.
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Insertion-ordered email addresses. Updates may only grow this set.
    pub emails: Vec<String>,
    /// Date of birth, serialised as `YYYY-MM-DD`.
    pub dob: NaiveDate,
}
