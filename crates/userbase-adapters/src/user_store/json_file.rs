//! Single-file JSON user store.
//!
//! The whole collection lives in one file as a JSON array. Every write
//! rewrites the file through a sibling temp file and a rename, so readers
//! see either the old or the new contents, never a torn write.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use userbase_core::{
    application::{ApplicationError, ports::UserRepository},
    domain::{User, UserId, UserPatch},
    error::{StorageContext, UserbaseResult},
};

use super::table::UserTable;

const BACKEND: &str = "file";

/// User store backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileUserRepository {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileUserRepository {
    /// Create a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> UserbaseResult<UserTable> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(UserTable::default()),
            Err(e) => return Err::<UserTable, _>(e).storage_context(BACKEND, "read users file"),
        };

        let users: Vec<User> = serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;

        UserTable::from_users(users).map_err(|id| corrupt(format!("duplicate id '{id}'")))
    }

    async fn store(&self, table: &UserTable) -> UserbaseResult<()> {
        let json = serde_json::to_vec_pretty(&table.all())
            .storage_context(BACKEND, "encode users")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .storage_context(BACKEND, "create data directory")?;
        }

        let tmp = temp_path(&self.path);
        tokio::fs::write(&tmp, json)
            .await
            .storage_context(BACKEND, "write temp file")?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .storage_context(BACKEND, "replace users file")?;

        debug!(path = %self.path.display(), users = table.len(), "Users file written");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn corrupt(reason: String) -> userbase_core::error::UserbaseError {
    ApplicationError::CorruptRecord {
        backend: BACKEND,
        reason,
    }
    .into()
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn get_all(&self) -> UserbaseResult<Vec<User>> {
        Ok(self.load().await?.all())
    }

    async fn get_by_id(&self, id: &UserId) -> UserbaseResult<Option<User>> {
        Ok(self.load().await?.get(id))
    }

    async fn create(&self, user: User) -> UserbaseResult<User> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.load().await?;
        let created = table.insert_new(user)?;
        self.store(&table).await?;
        Ok(created)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> UserbaseResult<User> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.load().await?;
        let updated = table.update(id, patch)?;
        self.store(&table).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> UserbaseResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.load().await?;
        table.remove(id)?;
        self.store(&table).await
    }
}
