//! In-process user store for local runs and tests.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::UserStore;
use crate::error::{AppError, AppResult, EMAIL_TAKEN};
use crate::models::User;

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        match users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(EMAIL_TAKEN.to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn user(email: &str) -> User {
        User {
            email: email.to_string(),
            hashed_password: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryUserStore::new();
        assert_ok!(store.insert(user("a@b.com")).await);
        let found = store.find_by_email("a@b.com").await.unwrap();
        assert_eq!(found, Some(user("a@b.com")));
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.insert(user("A@b.com")).await.unwrap();
        assert!(store.find_by_email("a@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = MemoryUserStore::new();
        store.insert(user("a@b.com")).await.unwrap();
        let err = assert_err!(store.insert(user("a@b.com")).await);
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_keep_one_record() {
        let store = MemoryUserStore::new();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(user("race@b.com")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
