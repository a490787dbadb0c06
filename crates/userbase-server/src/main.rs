//! # Userbase
//!
//! User CRUD over HTTP with a selectable storage backend.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Load configuration (defaults + file + env), since it names the log directory.
//! 3. Initialise the tracing subscriber.
//! 4. Dispatch to the command handler.
//! 5. Translate any [`ServerError`] into a message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | Usage error             |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};
use userbase_server::{
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    error::{ServerError, ServerResult},
    logging::init_logging,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprint!("{}", e.format_plain());
            return ExitCode::from(e.exit_code());
        }
    };

    // Held until exit so buffered file logs are flushed.
    let _guard = match init_logging(&cli.global, &config.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        "Userbase started"
    );

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(e),
    }
}

#[instrument(skip_all)]
async fn run(cli: Cli, config: AppConfig) -> ServerResult<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Config(args) => commands::config::execute(args, config),
    }
}

fn handle_error(err: ServerError) -> ExitCode {
    err.log();
    eprint!("{}", err.format_plain());
    ExitCode::from(err.exit_code())
}
