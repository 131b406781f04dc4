//! # Capsift Core
//!
//! Domain contracts, provider adapter, and the universe-construction
//! pipeline for capsift.
//!
//! ## Overview
//!
//! This crate builds a market-cap-ranked reference universe of US common
//! stocks from a market-data provider:
//!
//! - **Discovery** pages through the provider's active common-stock listing
//! - **Fetch** retrieves per-symbol reference metadata, isolating faults
//! - **Filter** admits NYSE/NASDAQ common stock with a valid market cap
//! - **Rank** orders by market cap descending, symbol ascending on ties
//! - **Sink** persists artifacts as headered CSV, atomically
//!
//! It also fetches adjusted daily OHLCV series for arbitrary symbol sets.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Polygon) |
//! | [`bars`] | Daily OHLCV retrieval for symbol sets |
//! | [`discovery`] | Paginated ticker discovery |
//! | [`domain`] | Domain models (Symbol, MetadataRecord, DailyBar) |
//! | [`error`] | Pipeline error types |
//! | [`fetcher`] | Per-symbol metadata retrieval |
//! | [`filter`] | Filter and rank policy |
//! | [`http_client`] | HTTP client abstraction |
//! | [`provider`] | Provider trait and request/response types |
//! | [`sink`] | CSV persistence |
//! | [`universe`] | Universe builder and build counters |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use capsift_core::{CsvSink, PolygonAdapter, UniverseBuilder};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = PolygonAdapter::from_env()?;
//!     let universe = UniverseBuilder::new(Arc::new(adapter)).build().await?;
//!
//!     let sink = CsvSink::new("data/stock_metadata.csv");
//!     let path = sink.write_universe(&universe)?;
//!     println!("wrote {} rows to {}", universe.len(), path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Faults are split by blast radius. A discovery fault or an empty listing
//! fails the whole build ([`UniverseError`]); a fault while fetching one
//! symbol's metadata is folded into [`FetchOutcome::Failure`] and moves a
//! counter; a record failing a filter predicate is counted and dropped.
//! Nothing is written to disk unless the build succeeded.

pub mod adapters;
pub mod bars;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod http_client;
pub mod provider;
pub mod sink;
pub mod universe;

// Adapters
pub use adapters::PolygonAdapter;

// Pipeline stages
pub use bars::collect_daily_bars;
pub use discovery::discover_active_common_stock_tickers;
pub use fetcher::fetch_metadata;
pub use filter::{
    rank_records, valid_market_cap, FilterPolicy, RejectReason, COMMON_STOCK, DEFAULT_EXCHANGES,
};
pub use universe::{BuildStats, Universe, UniverseBuilder};

// Domain models
pub use domain::{DailyBar, FetchOutcome, IsoDate, MetadataRecord, Symbol, SymbolBars};

// Errors
pub use error::{DiscoveryError, SinkError, UniverseError, ValidationError};

// Provider contract
pub use provider::{
    DailyBarsRequest, MarketDataSource, PageCursor, SourceError, SourceErrorKind, TickerPage,
    TickerPageRequest, LISTING_PAGE_SIZE,
};

// Transport
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Persistence
pub use sink::{CsvSink, DEFAULT_BARS_PATH, DEFAULT_UNIVERSE_PATH};
