//! Daily OHLCV retrieval for a set of symbols.

use crate::domain::{IsoDate, Symbol, SymbolBars};
use crate::provider::{DailyBarsRequest, MarketDataSource, SourceError};

/// Fetches adjusted daily bars for each symbol over an inclusive range.
///
/// Per-symbol provider faults are isolated: a failed series is logged and
/// skipped while the rest of the batch proceeds. Only an invalid range is
/// fatal, since it would fail every symbol the same way.
pub async fn collect_daily_bars(
    source: &dyn MarketDataSource,
    symbols: &[Symbol],
    from: IsoDate,
    to: IsoDate,
) -> Result<Vec<SymbolBars>, SourceError> {
    let mut series = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let request = DailyBarsRequest::new(symbol.clone(), from, to)?;
        match source.daily_bars(request).await {
            Ok(bars) => {
                tracing::debug!(symbol = %symbol, bars = bars.len(), "daily bars fetched");
                series.push(SymbolBars {
                    symbol: symbol.clone(),
                    bars,
                });
            }
            Err(reason) => {
                tracing::warn!(symbol = %symbol, reason = %reason, "daily bars fetch failed; symbol skipped");
            }
        }
    }

    Ok(series)
}
