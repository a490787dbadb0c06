//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. No business logic lives here.

use clap::{Args, Parser, Subcommand};
use userbase_adapters::{BackendConfig, BackendKind};

use crate::config::AppConfig;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "userbase",
    bin_name = "userbase",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "User CRUD service over interchangeable storage backends",
    after_help = "EXAMPLES:\n\
        \x20 userbase serve\n\
        \x20 userbase serve --port 8080 --backend sqlite --storage sqlite://users.db\n\
        \x20 userbase serve --backend document --storage ./data/users\n\
        \x20 userbase config --config ./userbase.toml",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server.
    #[command(visible_alias = "s", about = "Run the HTTP server")]
    Serve(ServeArgs),

    /// Print the effective configuration.
    #[command(about = "Print the effective configuration as JSON")]
    Config(ConfigArgs),
}

// ── serve ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Storage backend: memory, file, document or sqlite.
    #[arg(short = 'b', long, value_name = "KIND")]
    pub backend: Option<BackendKind>,

    /// Backend location: a file path, a directory, or a sqlite URL.
    #[arg(short = 's', long, value_name = "PATH_OR_URL")]
    pub storage: Option<String>,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Print the default config file location instead of the values.
    #[arg(long)]
    pub path: bool,
}

impl ServeArgs {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        let kind = match (self.backend, &self.storage) {
            // Naming the configured kind again keeps its configured location.
            (Some(kind), None) if kind == config.storage.kind() => return,
            (Some(kind), _) => kind,
            (None, Some(_)) => config.storage.kind(),
            (None, None) => return,
        };
        config.storage = BackendConfig::from_parts(kind, self.storage.clone());
    }
}
