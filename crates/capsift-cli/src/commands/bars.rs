use capsift_core::{collect_daily_bars, CsvSink, IsoDate, MarketDataSource, Symbol};

use crate::cli::BarsArgs;
use crate::error::CliError;

pub async fn run(args: &BarsArgs, source: &dyn MarketDataSource) -> Result<(), CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let from = IsoDate::parse(&args.from)?;
    let to = IsoDate::parse(&args.to)?;

    let series = collect_daily_bars(source, &symbols, from, to).await?;
    let total_bars: usize = series.iter().map(|entry| entry.bars.len()).sum();

    let sink = CsvSink::new(&args.output);
    let path = sink.write_daily_bars(&series)?;

    println!(
        "wrote {} bars across {} symbols to {}",
        total_bars,
        series.len(),
        path.display()
    );

    Ok(())
}
