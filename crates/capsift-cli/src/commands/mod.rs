mod bars;
mod tickers;
mod universe;

use std::sync::Arc;

use capsift_core::{MarketDataSource, PolygonAdapter};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let source = build_source(cli)?;

    match &cli.command {
        Command::Universe(args) => universe::run(args, source).await,
        Command::Bars(args) => bars::run(args, source.as_ref()).await,
        Command::Tickers(args) => tickers::run(args, source.as_ref()).await,
    }
}

/// Production provider: reqwest transport plus a bearer key from the
/// environment.
fn build_source(cli: &Cli) -> Result<Arc<dyn MarketDataSource>, CliError> {
    let adapter = PolygonAdapter::from_env()?.with_timeout_ms(cli.timeout_ms);
    Ok(Arc::new(adapter))
}
