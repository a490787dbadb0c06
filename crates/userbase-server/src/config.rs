//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! server crate owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by [`crate::cli::ServeArgs::apply`])
//! 2. `PORT` environment variable
//! 3. `USERBASE__*` environment variables (`__` separates sections,
//!    e.g. `USERBASE__STORAGE__KIND=sqlite`)
//! 4. Config file (`--config`, or the platform config directory)
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use userbase_adapters::BackendConfig;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 3000;
const ENV_PREFIX: &str = "USERBASE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    pub server: ServerConfig,
    /// Which backend stores users.
    pub storage: BackendConfig,
    /// Logging settings.
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// When set, logs are also written as JSON to a daily rolling file here.
    pub directory: Option<PathBuf>,
}

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ServerError> {
        let defaults = Config::try_from(&Self::default())?;

        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let mut builder = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(raw) = std::env::var("PORT") {
            let port: u16 = raw.parse().map_err(|_| ServerError::Config {
                message: format!("PORT must be a port number, got '{raw}'"),
                source: None,
            })?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `userbase.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "userbase", "userbase")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("userbase.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_3000() {
        assert_eq!(AppConfig::default().server.port, 3000);
        assert_eq!(AppConfig::default().server.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn default_backend_is_memory() {
        assert_eq!(AppConfig::default().storage, BackendConfig::Memory);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userbase.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 8081

            [storage]
            kind = "file"
            path = "/srv/users.json"

            [log]
            format = "json"
            "#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        if std::env::var("PORT").is_err() {
            assert_eq!(cfg.server.port, 8081);
        }
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(
            cfg.storage,
            BackendConfig::File {
                path: "/srv/users.json".into()
            }
        );
        assert_eq!(cfg.log.format, LogFormat::Json);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ServerError::Config { .. }));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
