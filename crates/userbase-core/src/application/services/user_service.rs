//! User Service - the use cases behind the `/users` routes.
//!
//! Each method maps 1:1 onto a [`UserRepository`] operation. What the service
//! adds on top of the repository:
//! 1. Raw ids from the transport layer are parsed into [`UserId`]
//! 2. Payloads are validated before the repository is touched
//! 3. Ids are assigned to new users that arrive without one

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::UserRepository,
    domain::{DomainError, NewUser, User, UserId, UserPatch},
    error::UserbaseResult,
};

/// User management service.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a new user service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Name of the backend this service is wired to.
    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }

    /// List all users.
    #[instrument(skip_all, fields(backend = self.backend()))]
    pub async fn list(&self) -> UserbaseResult<Vec<User>> {
        let users = self.repository.get_all().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Get a user by id.
    ///
    /// An id that is not even well-formed cannot be stored, so it is
    /// reported as absent rather than as a validation error.
    #[instrument(skip(self), fields(backend = self.backend()))]
    pub async fn get(&self, id: &str) -> UserbaseResult<Option<User>> {
        let Ok(id) = UserId::parse(id) else {
            debug!("Malformed id, treating as absent");
            return Ok(None);
        };
        self.repository.get_by_id(&id).await
    }

    /// Create a user.
    #[instrument(skip_all, fields(backend = self.backend()))]
    pub async fn create(&self, new_user: NewUser) -> UserbaseResult<User> {
        let user = new_user.into_user()?;
        let created = self.repository.create(user).await?;
        info!(id = %created.id, "User created");
        Ok(created)
    }

    /// Apply a partial update.
    #[instrument(skip(self, patch), fields(backend = self.backend()))]
    pub async fn update(&self, id: &str, patch: UserPatch) -> UserbaseResult<User> {
        let id = Self::existing_id(id)?;
        patch.validate()?;
        let updated = self.repository.update(&id, patch).await?;
        info!("User updated");
        Ok(updated)
    }

    /// Delete a user.
    #[instrument(skip(self), fields(backend = self.backend()))]
    pub async fn delete(&self, id: &str) -> UserbaseResult<()> {
        let id = Self::existing_id(id)?;
        self.repository.delete(&id).await?;
        info!("User deleted");
        Ok(())
    }

    /// Parse an id that must refer to a stored user.
    fn existing_id(raw: &str) -> UserbaseResult<UserId> {
        UserId::parse(raw).map_err(|_| DomainError::UserNotFound { id: raw.to_string() }.into())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockUserRepository;
    use crate::error::{ErrorCategory, UserbaseError};

    fn mock() -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_backend().return_const("mock");
        repo
    }

    fn service(repo: MockUserRepository) -> UserService {
        UserService::new(Arc::new(repo))
    }

    fn ada() -> User {
        User::new(UserId::parse("ada").unwrap(), "Ada", "ada@example.com")
    }

    #[tokio::test]
    async fn list_forwards_repository_result() {
        let mut repo = mock();
        repo.expect_get_all()
            .times(1)
            .returning(|| Ok(vec![ada()]));

        let users = service(repo).list().await.unwrap();
        assert_eq!(users, vec![ada()]);
    }

    #[tokio::test]
    async fn get_absent_is_none() {
        let mut repo = mock();
        repo.expect_get_by_id()
            .with(eq(UserId::parse("ghost").unwrap()))
            .times(1)
            .returning(|_| Ok(None));

        assert_eq!(service(repo).get("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_malformed_id_never_reaches_repository() {
        let repo = mock();
        assert_eq!(service(repo).get("not/an/id").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_assigns_id_when_missing() {
        let mut repo = mock();
        repo.expect_create().times(1).returning(Ok);

        let created = service(repo)
            .create(NewUser::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        assert!(UserId::parse(created.id.as_str()).is_ok());
        assert_eq!(created.name, "Ada");
    }

    #[tokio::test]
    async fn create_keeps_supplied_id() {
        let mut repo = mock();
        repo.expect_create()
            .withf(|user| user.id.as_str() == "ada")
            .times(1)
            .returning(Ok);

        let created = service(repo)
            .create(NewUser::new("Ada", "ada@example.com").with_id("ada"))
            .await
            .unwrap();
        assert_eq!(created, ada());
    }

    #[tokio::test]
    async fn create_validates_before_repository() {
        // No expectation on `create`: reaching the repository would panic.
        let repo = mock();

        let err = service(repo)
            .create(NewUser::new("Ada", "not-an-email"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn create_passes_conflict_through() {
        let mut repo = mock();
        repo.expect_create().returning(|user| {
            Err(DomainError::UserAlreadyExists {
                id: user.id.to_string(),
            }
            .into())
        });

        let err = service(repo)
            .create(NewUser::new("Ada", "ada@example.com").with_id("ada"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[tokio::test]
    async fn update_validates_patch() {
        let repo = mock();

        let err = service(repo)
            .update("ada", UserPatch::default().email("broken"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UserbaseError::Domain(DomainError::InvalidUser { field: "email", .. })
        ));
    }

    #[tokio::test]
    async fn update_forwards_patch() {
        let mut repo = mock();
        let patch = UserPatch::default().name("Countess");
        repo.expect_update()
            .with(eq(UserId::parse("ada").unwrap()), eq(patch.clone()))
            .times(1)
            .returning(|_, patch| Ok(ada().merged(patch)));

        let updated = service(repo).update("ada", patch).await.unwrap();
        assert_eq!(updated.name, "Countess");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn update_malformed_id_is_not_found() {
        let repo = mock();

        let err = service(repo)
            .update("bad id", UserPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let mut repo = mock();
        repo.expect_delete().times(1).returning(|id| {
            Err(DomainError::UserNotFound {
                id: id.to_string(),
            }
            .into())
        });

        let err = service(repo).delete("ghost").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
