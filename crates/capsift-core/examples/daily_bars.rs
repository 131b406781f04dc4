//! # Daily Bars Example
//!
//! Fetches adjusted daily OHLCV bars for a handful of symbols and prints
//! a summary of each series.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example daily_bars
//! ```
//!
//! ## Prerequisites
//!
//! Set your Polygon API key:
//!
//! ```bash
//! export CAPSIFT_POLYGON_API_KEY=your_key_here
//! ```

use capsift_core::{collect_daily_bars, IsoDate, PolygonAdapter, Symbol};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let adapter = PolygonAdapter::from_env()?;

    // Symbols and range to fetch
    let symbols = vec![
        Symbol::parse("AAPL")?,
        Symbol::parse("MSFT")?,
        Symbol::parse("NVDA")?,
    ];
    let from = IsoDate::parse("2024-01-01")?;
    let to = IsoDate::parse("2024-01-31")?;

    println!("📊 Fetching daily bars for {} symbols...", symbols.len());
    let series = collect_daily_bars(&adapter, &symbols, from, to).await?;

    // Summarize each series: span, bar count, close-to-close move
    println!();
    for entry in &series {
        let Some(first) = entry.bars.first() else {
            println!("{}: no bars in range", entry.symbol);
            continue;
        };
        let last = entry.bars.last().unwrap_or(first);
        let change = (last.close - first.close) / first.close * 100.0;

        println!(
            "✅ {:6} {} → {}  {:3} bars  close {:.2} → {:.2} ({:+.1}%)",
            entry.symbol.as_str(),
            first.date,
            last.date,
            entry.bars.len(),
            first.close,
            last.close,
            change
        );
    }

    println!();
    println!("Fetched {} of {} requested series", series.len(), symbols.len());

    Ok(())
}
