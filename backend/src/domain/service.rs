//! Request pipeline orchestrating validation, guards, and persistence.
//!
//! Each operation is an ordered chain of stages; the first failing stage
//! short-circuits with a typed [`Error`] and later stages never run. The
//! store is the only suspension point; validation and the email guard are
//! synchronous computation over values local to the request.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use super::email_guard::check_email_retention;
use super::error::{Error, ErrorCode};
use super::ports::{UserStore, UserStoreError};
use super::user::User;
use super::validate::{UserPayload, ValidateOptions, validate};

/// Use-case layer for the user resource.
///
/// Holds the storage port behind an [`Arc`] so the same instance serves every
/// request; construction happens once at startup with whichever adapter the
/// deployment injects.
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Build the pipeline around a storage adapter.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user from a raw payload, generating an id when absent.
    ///
    /// The generated id is injected into the payload before validation so the
    /// schema sees a complete record and the response echoes the final state.
    pub async fn create(&self, payload: Value) -> Result<User, Error> {
        let payload = with_generated_id(payload);
        let user = validate(&payload, &ValidateOptions::new())
            .and_then(UserPayload::into_user)
            .map_err(Error::invalid_payload)?;
        match self.store.create_if_absent(&user).await {
            Ok(()) => Ok(user),
            Err(UserStoreError::ConditionFailed) => Err(Error::user_already_exists()),
            Err(err) => Err(store_failure("create", &err)),
        }
    }

    /// Fetch a user by id.
    pub async fn fetch(&self, id: Uuid) -> Result<User, Error> {
        match self.store.get(&id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Error::user_not_found()),
            Err(err) => Err(store_failure("get", &err)),
        }
    }

    /// Replace a user: fetch, validate, guard, then conditionally persist.
    pub async fn update(&self, id: Uuid, payload: Value) -> Result<User, Error> {
        let existing = self.fetch(id).await?;

        let user = validate(&payload, &ValidateOptions::new())
            .and_then(UserPayload::into_user)
            .map_err(Error::invalid_payload)?;
        if user.id != id {
            return Err(Error::new(
                ErrorCode::InvalidPayload,
                "User ID in payload does not match ID in URL",
            ));
        }

        check_email_retention(&existing, &user)?;

        match self.store.update_if_present(&user).await {
            Ok(()) => Ok(user),
            // The record vanished between the fetch and the conditional write.
            Err(UserStoreError::ConditionFailed) => Err(Error::user_not_found()),
            Err(err) => Err(store_failure("update", &err)),
        }
    }

    /// Delete a user. Idempotent: no existence check is performed.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.store
            .delete(&id)
            .await
            .map_err(|err| store_failure("delete", &err))
    }
}

fn store_failure(operation: &str, err: &UserStoreError) -> Error {
    error!(operation, error = %err, "user store operation failed");
    Error::internal(err.to_string())
}

fn with_generated_id(mut payload: Value) -> Value {
    if let Some(object) = payload.as_object_mut() {
        if !object.contains_key("id") {
            object.insert("id".to_owned(), Value::String(Uuid::new_v4().to_string()));
        }
    }
    payload
}
