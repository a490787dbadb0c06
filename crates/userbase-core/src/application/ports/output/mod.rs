//! Driven (output) ports - implemented by infrastructure.
//!
//! The `userbase-adapters` crate provides the implementations.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserPatch};
use crate::error::UserbaseResult;

/// Port for user persistence.
///
/// Implemented by:
/// - `userbase_adapters::InMemoryUserRepository`
/// - `userbase_adapters::JsonFileUserRepository`
/// - `userbase_adapters::DocumentUserRepository`
/// - `userbase_adapters::SqliteUserRepository`
///
/// ## Contract
///
/// - `get_all` returns users ordered by id, ascending.
/// - `get_by_id` reports a missing user as `Ok(None)`, never as an error.
/// - `create` fails with `DomainError::UserAlreadyExists` on a taken id.
/// - `update` and `delete` fail with `DomainError::UserNotFound` on a missing id.
/// - `update` merges: only the fields present in the patch change.
/// - Infrastructure failures surface as `ApplicationError::StorageUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Short backend name, used in logs and error messages.
    fn backend(&self) -> &'static str;

    /// List every stored user.
    async fn get_all(&self) -> UserbaseResult<Vec<User>>;

    /// Look up one user.
    async fn get_by_id(&self, id: &UserId) -> UserbaseResult<Option<User>>;

    /// Store a new user and return it as stored.
    async fn create(&self, user: User) -> UserbaseResult<User>;

    /// Merge `patch` into an existing user and return the result.
    async fn update(&self, id: &UserId, patch: UserPatch) -> UserbaseResult<User>;

    /// Remove a user.
    async fn delete(&self, id: &UserId) -> UserbaseResult<()>;
}
