//! # Ranked Universe Example
//!
//! Builds the market-cap-ranked universe of US common stocks and prints
//! the top of the table.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example rank_universe
//! ```
//!
//! ## Prerequisites
//!
//! Set your Polygon API key:
//!
//! ```bash
//! export CAPSIFT_POLYGON_API_KEY=your_key_here
//! ```

use std::sync::Arc;

use capsift_core::{PolygonAdapter, UniverseBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Production adapter: reqwest transport + bearer key from the environment
    let adapter = PolygonAdapter::from_env()?;

    // Discover, fetch, filter, and rank with eight fetch workers
    println!("📊 Building the ranked common-stock universe...");
    let universe = UniverseBuilder::new(Arc::new(adapter))
        .with_fetch_concurrency(8)
        .build()
        .await?;

    // Print the ten largest admitted records
    println!();
    println!("┌──────┬────────┬──────────────┬──────────┐");
    println!("│ Rank │ Symbol │ Market Cap   │ Exchange │");
    println!("├──────┼────────┼──────────────┼──────────┤");

    for (rank, record) in universe.records().iter().take(10).enumerate() {
        let cap_billions = record.market_cap.unwrap_or(0.0) / 1_000_000_000.0;
        println!(
            "│ {:4} │ {:6} │ ${:10.1}B │ {:8} │",
            rank + 1,
            record.symbol.as_str(),
            cap_billions,
            record.primary_exchange
        );
    }

    println!("└──────┴────────┴──────────────┴──────────┘");
    println!();

    let stats = universe.stats();
    println!(
        "✅ Admitted {} of {} discovered symbols in {}ms",
        stats.admitted, stats.discovered, stats.elapsed_ms
    );

    Ok(())
}
