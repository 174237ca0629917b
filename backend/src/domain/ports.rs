//! Domain ports defining the edges of the hexagon.
//!
//! The storage port exposes conditional writes in the style of a remote
//! key-value store: the precondition is evaluated atomically with the write,
//! and a failed precondition surfaces as a typed error for the pipeline to
//! interpret. Adapters map their infrastructure failures into these variants
//! instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::user::User;

/// Errors surfaced by [`UserStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// A conditional write's precondition did not hold at write time.
    ///
    /// This is an authoritative "state changed under you" signal; callers map
    /// it to a domain outcome rather than retrying.
    #[error("storage condition failed")]
    ConditionFailed,
    /// Connectivity or backend failure inside the store.
    #[error("user store backend failure: {message}")]
    Backend { message: String },
}

impl UserStoreError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Conditional key-value persistence port for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the record only if no record with the same id exists.
    async fn create_if_absent(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch a record by id.
    async fn get(&self, id: &Uuid) -> Result<Option<User>, UserStoreError>;

    /// Replace the record only if a record with the same id still exists.
    async fn update_if_present(&self, user: &User) -> Result<(), UserStoreError>;

    /// Remove the record. Succeeds whether or not the record exists.
    async fn delete(&self, id: &Uuid) -> Result<(), UserStoreError>;
}
