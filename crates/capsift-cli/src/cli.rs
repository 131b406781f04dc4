//! CLI argument definitions for capsift.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `universe` | Build the market-cap-ranked common-stock universe and write it as CSV |
//! | `bars` | Fetch adjusted daily OHLCV bars for symbols over a date range |
//! | `tickers` | Print the discovered active common-stock listing |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//!
//! # Environment
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `CAPSIFT_POLYGON_API_KEY` | Provider API key (preferred) |
//! | `POLYGON_API_KEY` | Provider API key fallback |
//! | `RUST_LOG` | Log filter, e.g. `capsift=debug` |
//!
//! # Examples
//!
//! ```bash
//! # Build the ranked universe into data/stock_metadata.csv
//! capsift universe
//!
//! # Build it with 8 fetch workers into a custom path
//! capsift universe --concurrency 8 --output out/universe.csv
//!
//! # Fetch January 2024 daily bars for two symbols
//! capsift bars AAPL MSFT --from 2024-01-01 --to 2024-01-31
//!
//! # Peek at the first 20 discovered tickers
//! capsift tickers --limit 20
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use capsift_core::{DEFAULT_BARS_PATH, DEFAULT_UNIVERSE_PATH};

/// Equity universe construction from market-data providers.
///
/// Discovers the active US common-stock population, fetches per-ticker
/// reference metadata, filters to NYSE/NASDAQ common stock with a valid
/// market cap, ranks by market cap, and persists the result as CSV.
#[derive(Debug, Parser)]
#[command(
    name = "capsift",
    author,
    version,
    about = "Equity universe construction from market-data providers"
)]
pub struct Cli {
    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the market-cap-ranked common-stock universe and write it as CSV.
    Universe(UniverseArgs),

    /// Fetch adjusted daily OHLCV bars for symbols over a date range.
    Bars(BarsArgs),

    /// Print the discovered active common-stock listing.
    Tickers(TickersArgs),
}

#[derive(Debug, Args)]
pub struct UniverseArgs {
    /// Output CSV path.
    #[arg(long, default_value = DEFAULT_UNIVERSE_PATH)]
    pub output: PathBuf,

    /// Fetch workers for the per-symbol metadata stage (1 = sequential).
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

#[derive(Debug, Args)]
pub struct BarsArgs {
    /// Symbols to fetch, e.g. AAPL MSFT TSLA.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,

    /// Range start, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub from: String,

    /// Range end, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: String,

    /// Output CSV path.
    #[arg(long, default_value = DEFAULT_BARS_PATH)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct TickersArgs {
    /// Print at most this many symbols (all by default).
    #[arg(long)]
    pub limit: Option<usize>,
}
