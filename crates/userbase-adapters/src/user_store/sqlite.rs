//! Relational user store on SQLite, through sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info};
use userbase_core::{
    application::{ApplicationError, ports::UserRepository},
    domain::{DomainError, User, UserId, UserPatch},
    error::{StorageContext, UserbaseError, UserbaseResult},
};

use super::table::not_found;

const BACKEND: &str = "sqlite";

/// User store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserbaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::parse(row.id).map_err(|e| ApplicationError::CorruptRecord {
            backend: BACKEND,
            reason: e.to_string(),
        })?;
        Ok(User::new(id, row.name, row.email))
    }
}

impl SqliteUserRepository {
    /// Connect to `url` (e.g. `sqlite://users.db` or `sqlite::memory:`),
    /// creating the database file and the `users` table when missing.
    pub async fn connect(url: &str) -> UserbaseResult<Self> {
        if !url.starts_with("sqlite:") {
            return Err(UserbaseError::configuration(format!(
                "sqlite url must start with 'sqlite:', got '{url}'"
            )));
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| UserbaseError::configuration(format!("invalid sqlite url '{url}': {e}")))?
            .create_if_missing(true);

        // An in-memory database lives and dies with its connection, so the
        // pool must hold exactly one and never recycle it.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .storage_context(BACKEND, "connect")?;

        let repo = Self::from_pool(pool);
        repo.create_table().await?;
        info!(url, "SQLite user store ready");
        Ok(repo)
    }

    /// Wrap an existing pool. Call [`Self::create_table`] before use.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_table(&self) -> UserbaseResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .storage_context(BACKEND, "create users table")?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn get_all(&self) -> UserbaseResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .storage_context(BACKEND, "list users")?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn get_by_id(&self, id: &UserId) -> UserbaseResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .storage_context(BACKEND, "fetch user")?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: User) -> UserbaseResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.email)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(id = %user.id, "Row inserted");
                Ok(user)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DomainError::UserAlreadyExists {
                    id: user.id.into_inner(),
                }
                .into())
            }
            Err(e) => Err::<User, _>(e).storage_context(BACKEND, "insert user"),
        }
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> UserbaseResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET
                name = COALESCE(?, name),
                email = COALESCE(?, email)
            WHERE id = ?
            RETURNING id, name, email
            "#,
        )
        .bind(patch.name)
        .bind(patch.email)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .storage_context(BACKEND, "update user")?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }

    async fn delete(&self, id: &UserId) -> UserbaseResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .storage_context(BACKEND, "delete user")?;

        if result.rows_affected() == 0 {
            return Err(not_found(id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userbase_core::error::ErrorCategory;

    #[tokio::test]
    async fn memory_database_keeps_state_across_calls() {
        let repo = SqliteUserRepository::connect("sqlite::memory:").await.unwrap();
        let user = User::new(UserId::parse("a").unwrap(), "A", "a@example.com");

        repo.create(user.clone()).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        let url = format!("sqlite://{}", path.display());

        SqliteUserRepository::connect(&url).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn bad_url_is_configuration_error() {
        let err = SqliteUserRepository::connect("postgres://nope")
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[tokio::test]
    async fn corrupt_row_is_reported() {
        let repo = SqliteUserRepository::connect("sqlite::memory:").await.unwrap();
        sqlx::query("INSERT INTO users (id, name, email) VALUES ('bad id', 'X', 'x@example.com')")
            .execute(repo.pool())
            .await
            .unwrap();

        let err = repo.get_all().await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
