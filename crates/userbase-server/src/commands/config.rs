//! `userbase config`: show the configuration the server would run with.

use std::io::Write as _;

use userbase_core::error::UserbaseError;

use crate::{
    cli::ConfigArgs,
    config::AppConfig,
    error::{ServerError, ServerResult},
};

pub fn execute(args: ConfigArgs, config: AppConfig) -> ServerResult<()> {
    let text = if args.path {
        AppConfig::config_path().display().to_string()
    } else {
        render(&config)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").map_err(|source| ServerError::Io {
        message: "failed to write to stdout".into(),
        source,
    })
}

fn render(config: &AppConfig) -> ServerResult<String> {
    serde_json::to_string_pretty(config).map_err(|e| {
        UserbaseError::Internal {
            message: format!("failed to serialise configuration: {e}"),
        }
        .into()
    })
}
