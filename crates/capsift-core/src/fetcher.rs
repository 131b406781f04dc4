//! Per-symbol metadata retrieval.

use crate::domain::{FetchOutcome, Symbol};
use crate::provider::MarketDataSource;

/// Fetches one symbol's metadata, folding any fault into the returned
/// outcome.
///
/// This function never fails: provider errors become
/// [`FetchOutcome::Failure`] so a bad symbol cannot abort the batch it is
/// part of.
pub async fn fetch_metadata(source: &dyn MarketDataSource, symbol: &Symbol) -> FetchOutcome {
    match source.ticker_details(symbol).await {
        Ok(record) => FetchOutcome::Success(record),
        Err(reason) => FetchOutcome::Failure {
            symbol: symbol.clone(),
            reason,
        },
    }
}
