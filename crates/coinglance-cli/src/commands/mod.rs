mod top;
mod watch;

use std::process::ExitCode;
use std::sync::Arc;

use coinglance_core::{CoinGeckoClient, MarketConfig, MarketDataSource};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Exit code reported when the snapshot could not be fetched.
pub const FETCH_FAILED_EXIT: u8 = 3;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = resolve_config(cli, MarketConfig::from_env()?)?;
    debug!(
        base_url = %config.base_url,
        per_page = config.per_page,
        timeout_ms = config.timeout_ms,
        mock = cli.mock,
        "resolved market config"
    );

    let per_page = config.per_page;
    let source: Arc<dyn MarketDataSource> = if cli.mock {
        Arc::new(CoinGeckoClient::mock(config))
    } else {
        Arc::new(CoinGeckoClient::new(config))
    };

    match &cli.command {
        Command::Top(args) => top::run(cli, args, source.as_ref(), per_page).await,
        Command::Watch(args) => watch::run(cli, args, source, per_page).await,
    }
}

/// Applies command-line overrides on top of `base`, then validates.
fn resolve_config(cli: &Cli, base: MarketConfig) -> Result<MarketConfig, CliError> {
    let mut config = base;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(limit) = cli.limit {
        config = config.with_per_page(limit);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    Ok(config.validate()?)
}
