use capsift_core::{discover_active_common_stock_tickers, MarketDataSource};

use crate::cli::TickersArgs;
use crate::error::CliError;

pub async fn run(args: &TickersArgs, source: &dyn MarketDataSource) -> Result<(), CliError> {
    let symbols = discover_active_common_stock_tickers(source).await?;

    let shown = args.limit.unwrap_or(symbols.len()).min(symbols.len());
    for symbol in &symbols[..shown] {
        println!("{symbol}");
    }

    if shown < symbols.len() {
        eprintln!("({} of {} symbols shown)", shown, symbols.len());
    }

    Ok(())
}
