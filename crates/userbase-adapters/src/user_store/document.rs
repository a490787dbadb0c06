//! Document-directory user store.
//!
//! Each user is one JSON document inside a directory, the way a document
//! database keeps one document per key. Listing walks the directory;
//! single-user operations touch only their own document.
//!
//! Ids are case-sensitive but some filesystems are not, so file names never
//! rely on letter case: every upper-case letter is written as `~` followed by
//! its lower-case form (`Ada` is stored as `~ada.json`, `ada` as `ada.json`).

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use userbase_core::{
    application::{ApplicationError, ports::UserRepository},
    domain::{DomainError, User, UserId, UserPatch},
    error::{StorageContext, UserbaseError, UserbaseResult},
};
use walkdir::WalkDir;

use super::table::not_found;

const BACKEND: &str = "document";
const EXTENSION: &str = "json";

/// User store keeping one JSON document per user.
#[derive(Debug)]
pub struct DocumentUserRepository {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl DocumentUserRepository {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn document_path(&self, id: &UserId) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", file_stem(id)))
    }

    async fn read_document(&self, id: &UserId) -> UserbaseResult<Option<User>> {
        let path = self.document_path(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&path, &bytes, Some(id)).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err::<Option<User>, _>(e).storage_context(BACKEND, "read document"),
        }
    }

    async fn write_document(&self, user: &User) -> UserbaseResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .storage_context(BACKEND, "create document directory")?;

        let json = serde_json::to_vec_pretty(user).storage_context(BACKEND, "encode document")?;
        let path = self.document_path(&user.id);
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));

        tokio::fs::write(&tmp, json)
            .await
            .storage_context(BACKEND, "write temp document")?;
        tokio::fs::rename(&tmp, &path)
            .await
            .storage_context(BACKEND, "replace document")?;

        debug!(path = %path.display(), "Document written");
        Ok(())
    }
}

/// Case-free file stem for `id`. `~` cannot appear in an id, so the mapping
/// is injective.
fn file_stem(id: &UserId) -> String {
    let mut stem = String::with_capacity(id.as_str().len());
    for c in id.as_str().chars() {
        if c.is_ascii_uppercase() {
            stem.push('~');
            stem.push(c.to_ascii_lowercase());
        } else {
            stem.push(c);
        }
    }
    stem
}

/// Decode one document, checking the id inside matches the file name.
fn decode(path: &Path, bytes: &[u8], expected: Option<&UserId>) -> UserbaseResult<User> {
    let user: User = serde_json::from_slice(bytes).map_err(|e| corrupt(path, e))?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if file_stem(&user.id) != stem || expected.is_some_and(|id| id != &user.id) {
        return Err(corrupt(path, format!("document holds id '{}'", user.id)));
    }

    Ok(user)
}

fn corrupt(path: &Path, reason: impl std::fmt::Display) -> UserbaseError {
    ApplicationError::CorruptRecord {
        backend: BACKEND,
        reason: format!("{}: {reason}", path.display()),
    }
    .into()
}

/// Blocking scan of every `*.json` document in `dir`, ordered by id.
fn scan(dir: &Path) -> UserbaseResult<Vec<User>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut users = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.storage_context(BACKEND, "walk document directory")?;
        let path = entry.path();

        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION)
        {
            continue;
        }

        let bytes = std::fs::read(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Unreadable document");
            ApplicationError::StorageUnavailable {
                backend: BACKEND,
                reason: format!("failed to read {}: {e}", path.display()),
            }
        })?;
        users.push(decode(path, &bytes, None)?);
    }

    users.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(users)
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn get_all(&self) -> UserbaseResult<Vec<User>> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || scan(&dir))
            .await
            .map_err(|e| UserbaseError::Internal {
                message: format!("document scan task failed: {e}"),
            })?
    }

    async fn get_by_id(&self, id: &UserId) -> UserbaseResult<Option<User>> {
        self.read_document(id).await
    }

    async fn create(&self, user: User) -> UserbaseResult<User> {
        let _guard = self.write_lock.lock().await;

        let exists = tokio::fs::try_exists(self.document_path(&user.id))
            .await
            .storage_context(BACKEND, "check document")?;
        if exists {
            return Err(DomainError::UserAlreadyExists {
                id: user.id.into_inner(),
            }
            .into());
        }

        self.write_document(&user).await?;
        Ok(user)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> UserbaseResult<User> {
        let _guard = self.write_lock.lock().await;

        let user = self
            .read_document(id)
            .await?
            .ok_or_else(|| not_found(id))?
            .merged(patch);

        self.write_document(&user).await?;
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> UserbaseResult<()> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::remove_file(self.document_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found(id).into()),
            Err(e) => Err::<(), _>(e).storage_context(BACKEND, "remove document"),
        }
    }
}
