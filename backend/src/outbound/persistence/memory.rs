//! In-memory user store with conditional-write semantics.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::{UserStore, UserStoreError};

/// Conditional key-value store backed by a process-local map.
///
/// Each operation takes the map lock exactly once, so the precondition check
/// and the write are atomic with respect to concurrent requests.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, User>>, UserStoreError> {
        self.records
            .lock()
            .map_err(|_| UserStoreError::backend("user store lock poisoned"))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_if_absent(&self, user: &User) -> Result<(), UserStoreError> {
        let mut records = self.lock()?;
        if records.contains_key(&user.id) {
            return Err(UserStoreError::ConditionFailed);
        }
        records.insert(user.id, user.clone());
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<User>, UserStoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn update_if_present(&self, user: &User) -> Result<(), UserStoreError> {
        let mut records = self.lock()?;
        match records.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(UserStoreError::ConditionFailed),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<(), UserStoreError> {
        self.lock()?.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: Uuid, first_name: &str) -> User {
        User {
            id,
            first_name: first_name.to_owned(),
            last_name: "Doe".to_owned(),
            emails: vec![format!("{}@x.com", first_name.to_lowercase())],
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = InMemoryUserStore::new();
        let stored = user(Uuid::new_v4(), "John");
        store.create_if_absent(&stored).await.expect("create");
        let fetched = store.get(&stored.id).await.expect("get");
        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn create_fails_the_condition_on_an_existing_id() {
        let store = InMemoryUserStore::new();
        let stored = user(Uuid::new_v4(), "John");
        store.create_if_absent(&stored).await.expect("create");
        let err = store
            .create_if_absent(&stored)
            .await
            .expect_err("duplicate create");
        assert_eq!(err, UserStoreError::ConditionFailed);
        // The stored record is untouched.
        assert_eq!(store.get(&stored.id).await.expect("get"), Some(stored));
    }

    #[tokio::test]
    async fn update_fails_the_condition_on_a_missing_id() {
        let store = InMemoryUserStore::new();
        let err = store
            .update_if_present(&user(Uuid::new_v4(), "John"))
            .await
            .expect_err("update of missing record");
        assert_eq!(err, UserStoreError::ConditionFailed);
    }

    #[tokio::test]
    async fn update_replaces_an_existing_record() {
        let store = InMemoryUserStore::new();
        let id = Uuid::new_v4();
        store.create_if_absent(&user(id, "John")).await.expect("create");
        let replacement = user(id, "Johnny");
        store
            .update_if_present(&replacement)
            .await
            .expect("update");
        assert_eq!(store.get(&id).await.expect("get"), Some(replacement));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryUserStore::new();
        let id = Uuid::new_v4();
        store.create_if_absent(&user(id, "John")).await.expect("create");
        store.delete(&id).await.expect("first delete");
        store.delete(&id).await.expect("second delete");
        assert_eq!(store.get(&id).await.expect("get"), None);
    }
}
