//! In-memory user store.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use userbase_core::{
    application::{ApplicationError, ports::UserRepository},
    domain::{User, UserId, UserPatch},
    error::UserbaseResult,
};

use super::table::UserTable;

const BACKEND: &str = "memory";

/// Thread-safe in-memory user store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of users.
    pub fn len(&self) -> usize {
        self.read().map(|table| table.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all users.
    pub fn clear(&self) -> UserbaseResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> UserbaseResult<RwLockReadGuard<'_, UserTable>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> UserbaseResult<RwLockWriteGuard<'_, UserTable>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> userbase_core::error::UserbaseError {
    ApplicationError::StorageUnavailable {
        backend: BACKEND,
        reason: "lock poisoned".into(),
    }
    .into()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn get_all(&self) -> UserbaseResult<Vec<User>> {
        Ok(self.read()?.all())
    }

    async fn get_by_id(&self, id: &UserId) -> UserbaseResult<Option<User>> {
        Ok(self.read()?.get(id))
    }

    async fn create(&self, user: User) -> UserbaseResult<User> {
        Ok(self.write()?.insert_new(user)?)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> UserbaseResult<User> {
        Ok(self.write()?.update(id, patch)?)
    }

    async fn delete(&self, id: &UserId) -> UserbaseResult<()> {
        self.write()?.remove(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryUserRepository::new();
        let clone = repo.clone();

        repo.create(User::new(UserId::parse("a").unwrap(), "A", "a@example.com"))
            .await
            .unwrap();

        assert_eq!(clone.len(), 1);
        clone.clear().unwrap();
        assert!(repo.is_empty());
    }
}
