//! Universe construction: discovery, per-symbol fetch, filter, rank.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::discovery::discover_active_common_stock_tickers;
use crate::domain::{FetchOutcome, MetadataRecord, Symbol};
use crate::error::UniverseError;
use crate::fetcher::fetch_metadata;
use crate::filter::{rank_records, FilterPolicy, RejectReason};
use crate::provider::MarketDataSource;

/// How often the fetch stage reports progress.
const PROGRESS_EVERY: usize = 100;

/// Informational counters from one universe build.
///
/// Counters never influence membership or ordering; they exist for logs and
/// operator sanity checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub discovered: usize,
    pub fetch_failures: usize,
    pub missing_market_cap: usize,
    pub rejected_exchange: usize,
    pub rejected_security_type: usize,
    pub rejected_market_cap: usize,
    pub admitted: usize,
    pub elapsed_ms: u64,
}

impl BuildStats {
    fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Exchange => self.rejected_exchange += 1,
            RejectReason::SecurityType => self.rejected_security_type += 1,
            RejectReason::MarketCap => self.rejected_market_cap += 1,
        }
    }
}

/// The ranked reference universe: every record passed the filter policy,
/// ordered by market cap descending with symbol-ascending tie-breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    records: Vec<MetadataRecord>,
    stats: BuildStats,
}

impl Universe {
    pub(crate) fn new(records: Vec<MetadataRecord>, stats: BuildStats) -> Self {
        Self { records, stats }
    }

    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<MetadataRecord> {
        self.records
    }
}

/// Builds the ranked universe from a provider source.
///
/// The pipeline fails only when discovery fails or yields zero symbols.
/// Per-symbol fetch faults and filter rejections shrink the output and bump
/// counters; they never abort the build.
pub struct UniverseBuilder {
    source: Arc<dyn MarketDataSource>,
    policy: FilterPolicy,
    fetch_concurrency: usize,
}

impl UniverseBuilder {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            policy: FilterPolicy::default(),
            fetch_concurrency: 1,
        }
    }

    pub fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bounded worker count for the per-symbol fetch stage. `1` keeps the
    /// sequential baseline. Output ordering is identical either way; the
    /// rank stage owns it.
    pub fn with_fetch_concurrency(mut self, workers: usize) -> Self {
        self.fetch_concurrency = workers.max(1);
        self
    }

    pub async fn build(&self) -> Result<Universe, UniverseError> {
        let started = Instant::now();
        let mut stats = BuildStats::default();

        let symbols = discover_active_common_stock_tickers(self.source.as_ref()).await?;
        if symbols.is_empty() {
            return Err(UniverseError::EmptyUniverse);
        }
        stats.discovered = symbols.len();

        tracing::info!(
            symbols = symbols.len(),
            workers = self.fetch_concurrency,
            "fetching metadata for discovered tickers"
        );

        let mut fetched = Vec::with_capacity(symbols.len());
        if self.fetch_concurrency > 1 {
            self.fetch_bounded(&symbols, &mut fetched, &mut stats).await;
        } else {
            self.fetch_sequential(&symbols, &mut fetched, &mut stats)
                .await;
        }

        let mut admitted = Vec::with_capacity(fetched.len());
        for record in fetched {
            match self.policy.evaluate(&record) {
                None => admitted.push(record),
                Some(reason) => {
                    stats.record_rejection(reason);
                    tracing::debug!(symbol = %record.symbol, reason = ?reason, "record filtered out");
                }
            }
        }

        rank_records(&mut admitted);
        stats.admitted = admitted.len();
        stats.elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            discovered = stats.discovered,
            fetch_failures = stats.fetch_failures,
            missing_market_cap = stats.missing_market_cap,
            rejected_exchange = stats.rejected_exchange,
            rejected_security_type = stats.rejected_security_type,
            rejected_market_cap = stats.rejected_market_cap,
            admitted = stats.admitted,
            elapsed_ms = stats.elapsed_ms,
            "universe build complete"
        );

        Ok(Universe::new(admitted, stats))
    }

    async fn fetch_sequential(
        &self,
        symbols: &[Symbol],
        records: &mut Vec<MetadataRecord>,
        stats: &mut BuildStats,
    ) {
        let total = symbols.len();
        for (index, symbol) in symbols.iter().enumerate() {
            let outcome = fetch_metadata(self.source.as_ref(), symbol).await;
            absorb(outcome, records, stats);

            let done = index + 1;
            if done % PROGRESS_EVERY == 0 {
                tracing::info!(done, total, "metadata fetch progress");
            }
        }
    }

    async fn fetch_bounded(
        &self,
        symbols: &[Symbol],
        records: &mut Vec<MetadataRecord>,
        stats: &mut BuildStats,
    ) {
        let semaphore = Arc::new(Semaphore::new(self.fetch_concurrency));
        let mut tasks = JoinSet::new();

        for symbol in symbols {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let symbol = symbol.clone();
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("fetch semaphore is never closed");
                fetch_metadata(source.as_ref(), &symbol).await
            });
        }

        let total = symbols.len();
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next().await {
            done += 1;
            match joined {
                Ok(outcome) => absorb(outcome, records, stats),
                Err(error) => {
                    stats.fetch_failures += 1;
                    tracing::warn!(error = %error, "metadata fetch task aborted");
                }
            }

            if done % PROGRESS_EVERY == 0 {
                tracing::info!(done, total, "metadata fetch progress");
            }
        }
    }
}

/// Folds one fetch outcome into the accumulator: successes with a reported
/// market cap are kept for filtering, everything else only moves counters.
fn absorb(outcome: FetchOutcome, records: &mut Vec<MetadataRecord>, stats: &mut BuildStats) {
    match outcome {
        FetchOutcome::Success(record) => {
            if record.market_cap.is_some() {
                records.push(record);
            } else {
                stats.missing_market_cap += 1;
                tracing::debug!(symbol = %record.symbol, "record has no market cap; dropped");
            }
        }
        FetchOutcome::Failure { symbol, reason } => {
            stats.fetch_failures += 1;
            tracing::warn!(symbol = %symbol, reason = %reason, "metadata fetch failed");
        }
    }
}
