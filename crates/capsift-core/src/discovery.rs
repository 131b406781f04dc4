//! Paginated ticker discovery.

use crate::domain::Symbol;
use crate::error::DiscoveryError;
use crate::provider::{MarketDataSource, TickerPageRequest};

/// Collects the complete active common-stock listing, following provider
/// pagination until it is exhausted.
///
/// All-or-nothing: a fault on any page fails the call. Page order and the
/// order of symbols within a page are preserved as the provider returned
/// them.
pub async fn discover_active_common_stock_tickers(
    source: &dyn MarketDataSource,
) -> Result<Vec<Symbol>, DiscoveryError> {
    let base = TickerPageRequest::common_stocks();

    let mut symbols = Vec::new();
    let mut cursor: Option<crate::provider::PageCursor> = None;
    let mut page = 0usize;

    loop {
        let request = match &cursor {
            Some(next) => base.clone().with_cursor(next.clone()),
            None => base.clone(),
        };

        let ticker_page = source
            .ticker_page(request)
            .await
            .map_err(|source| DiscoveryError::Page { page, source })?;

        tracing::debug!(page, count = ticker_page.symbols.len(), "listing page fetched");
        symbols.extend(ticker_page.symbols);

        match ticker_page.next {
            Some(next) => {
                // A provider echoing the same cursor would loop forever.
                if cursor.as_ref() == Some(&next) {
                    return Err(DiscoveryError::CursorLoop { page });
                }
                cursor = Some(next);
                page += 1;
            }
            None => break,
        }
    }

    tracing::info!(
        total = symbols.len(),
        pages = page + 1,
        "ticker discovery complete"
    );
    Ok(symbols)
}
