//! CLI argument definitions for coinglance.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `top` | Fetch the top coins once and print them |
//! | `watch` | Interactive dashboard with live filtering and retry |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--limit` | `10` | Number of coins to fetch |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--base-url` | CoinGecko v3 | Market API base url |
//! | `--mock` | `false` | Serve bundled sample data instead of the network |
//! | `-v` | warn | Raise log verbosity (repeatable) |
//!
//! `--limit`, `--timeout-ms` and `--base-url` fall back to the
//! `COINGLANCE_*` environment variables, then to the defaults.
//!
//! # Examples
//!
//! ```bash
//! coinglance top
//! coinglance top --query bit --format json --pretty
//! coinglance watch --limit 25
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Crypto market glance for the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "coinglance",
    author,
    version,
    about = "Top cryptocurrencies by market cap, with name search",
    long_about = "coinglance fetches the top cryptocurrencies by market cap from CoinGecko \
and shows each coin's USD price and 24h change.\n\
\n\
Use 'coinglance watch' for an interactive view: type to filter by name, \
':r' to reload, ':q' to quit."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Number of coins to fetch (1-250).
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Market API base url.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Serve bundled sample data instead of calling the network.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON object with metadata and the rendered view.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the top coins once and print them.
    ///
    /// Exits with code 3 when the fetch fails.
    ///
    /// # Examples
    ///
    ///   coinglance top
    ///   coinglance top --query eth
    Top(QueryArgs),

    /// Interactive dashboard.
    ///
    /// Each input line replaces the search query. ':r' reloads, ':q' or
    /// end of input quits.
    Watch(QueryArgs),
}

/// Arguments shared by `top` and `watch`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Case-insensitive name filter.
    #[arg(long, short, default_value = "")]
    pub query: String,
}
