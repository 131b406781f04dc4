use std::sync::Arc;

use capsift_core::{CsvSink, MarketDataSource, UniverseBuilder};

use crate::cli::UniverseArgs;
use crate::error::CliError;

pub async fn run(args: &UniverseArgs, source: Arc<dyn MarketDataSource>) -> Result<(), CliError> {
    let universe = UniverseBuilder::new(source)
        .with_fetch_concurrency(args.concurrency)
        .build()
        .await?;

    let sink = CsvSink::new(&args.output);
    let path = sink.write_universe(&universe)?;

    let stats = universe.stats();
    println!(
        "wrote {} of {} discovered symbols to {}",
        universe.len(),
        stats.discovered,
        path.display()
    );

    Ok(())
}
