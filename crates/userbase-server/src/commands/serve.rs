//! `userbase serve`: wire the selected backend into the service and run HTTP.

use tracing::{debug, instrument};
use userbase_core::application::UserService;

use crate::{cli::ServeArgs, config::AppConfig, error::ServerResult, http};

#[instrument(skip_all)]
pub async fn execute(args: ServeArgs, mut config: AppConfig) -> ServerResult<()> {
    args.apply(&mut config);
    debug!(?config, "Effective configuration");

    let repository = userbase_adapters::connect(&config.storage).await?;
    let users = UserService::new(repository);

    http::serve(&config.server, users).await
}
