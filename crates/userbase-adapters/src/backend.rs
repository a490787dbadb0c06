//! Backend selection.
//!
//! The active storage backend is chosen by an explicit [`BackendConfig`]
//! value handed to [`connect`], never by global state.

use std::{fmt, path::PathBuf, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::info;
use userbase_core::{
    application::ports::UserRepository,
    error::{UserbaseError, UserbaseResult},
};

use crate::user_store::{
    DocumentUserRepository, InMemoryUserRepository, JsonFileUserRepository, SqliteUserRepository,
};

pub const DEFAULT_FILE_PATH: &str = "users.json";
pub const DEFAULT_DOCUMENT_DIR: &str = "users.d";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://users.db";

/// Which storage technology backs the repository, plus where it lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Process-local map, lost on restart.
    #[default]
    Memory,
    /// One JSON file holding every user.
    File {
        #[serde(default = "default_file_path")]
        path: PathBuf,
    },
    /// A directory with one JSON document per user.
    Document {
        #[serde(default = "default_document_dir")]
        dir: PathBuf,
    },
    /// A SQLite database, addressed by sqlx URL.
    Sqlite {
        #[serde(default = "default_sqlite_url")]
        url: String,
    },
}

fn default_file_path() -> PathBuf {
    DEFAULT_FILE_PATH.into()
}

fn default_document_dir() -> PathBuf {
    DEFAULT_DOCUMENT_DIR.into()
}

fn default_sqlite_url() -> String {
    DEFAULT_SQLITE_URL.into()
}

impl BackendConfig {
    /// Build a config from a kind and an optional location (path or URL).
    ///
    /// Kinds that need a location fall back to a default one in the
    /// working directory.
    pub fn from_parts(kind: BackendKind, location: Option<String>) -> Self {
        match kind {
            BackendKind::Memory => Self::Memory,
            BackendKind::File => Self::File {
                path: location.map_or_else(default_file_path, PathBuf::from),
            },
            BackendKind::Document => Self::Document {
                dir: location.map_or_else(default_document_dir, PathBuf::from),
            },
            BackendKind::Sqlite => Self::Sqlite {
                url: location.unwrap_or_else(default_sqlite_url),
            },
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Memory => BackendKind::Memory,
            Self::File { .. } => BackendKind::File,
            Self::Document { .. } => BackendKind::Document,
            Self::Sqlite { .. } => BackendKind::Sqlite,
        }
    }

    /// Where the data lives, for logging.
    pub fn location(&self) -> String {
        match self {
            Self::Memory => "process memory".into(),
            Self::File { path } => path.display().to_string(),
            Self::Document { dir } => dir.display().to_string(),
            Self::Sqlite { url } => url.clone(),
        }
    }
}

/// Storage technology, without its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    File,
    Document,
    Sqlite,
}

impl BackendKind {
    pub const ALL: [Self; 4] = [Self::Memory, Self::File, Self::Document, Self::Sqlite];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Document => "document",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = UserbaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            "document" | "documents" | "doc" => Ok(Self::Document),
            "sqlite" | "sql" | "relational" => Ok(Self::Sqlite),
            other => Err(UserbaseError::configuration(format!(
                "unknown storage backend '{other}' (expected one of: memory, file, document, sqlite)"
            ))),
        }
    }
}

/// Build the repository selected by `config`.
pub async fn connect(config: &BackendConfig) -> UserbaseResult<Arc<dyn UserRepository>> {
    let repository: Arc<dyn UserRepository> = match config {
        BackendConfig::Memory => Arc::new(InMemoryUserRepository::new()),
        BackendConfig::File { path } => Arc::new(JsonFileUserRepository::new(path)),
        BackendConfig::Document { dir } => Arc::new(DocumentUserRepository::new(dir)),
        BackendConfig::Sqlite { url } => Arc::new(SqliteUserRepository::connect(url).await?),
    };

    info!(
        backend = repository.backend(),
        location = %config.location(),
        "Storage backend connected"
    );
    Ok(repository)
}
