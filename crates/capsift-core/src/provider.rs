//! Market-data provider contract and request/response types.
//!
//! This module defines the capability surface (`MarketDataSource`) that a
//! provider adapter must implement, along with the request and response
//! types for each operation.
//!
//! # Operations
//!
//! | Operation | Request | Response | Description |
//! |-----------|---------|----------|-------------|
//! | Ticker page | [`TickerPageRequest`] | [`TickerPage`] | One page of the active listing |
//! | Ticker details | [`Symbol`] | [`MetadataRecord`] | Per-security reference metadata |
//! | Daily bars | [`DailyBarsRequest`] | `Vec<DailyBar>` | Adjusted daily OHLCV aggregates |
//!
//! Pagination is provider-owned: a [`TickerPage`] either carries an opaque
//! [`PageCursor`] for the next page or marks the listing exhausted.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::domain::{DailyBar, IsoDate, MetadataRecord, Symbol};

/// Listing page size requested during discovery.
pub const LISTING_PAGE_SIZE: usize = 1_000;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Rejected before any transport work happened.
    InvalidRequest,
    /// The HTTP exchange itself failed (connect, timeout, read).
    Transport,
    /// The provider answered with a non-success HTTP status.
    Status,
    /// The provider body could not be decoded into domain types.
    Decode,
}

/// Structured provider error carried through fetch outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: format!("provider returned HTTP status {status}"),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Decode,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Decode => "source.decode",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Opaque pagination cursor handed back by the provider.
///
/// The pipeline never inspects it; it is returned to the provider verbatim
/// to request the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(cursor: impl Into<String>) -> Self {
        Self(cursor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request payload for one page of the ticker listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerPageRequest {
    pub market: String,
    pub security_type: String,
    pub active: bool,
    pub page_size: usize,
    pub cursor: Option<PageCursor>,
}

impl TickerPageRequest {
    /// Listing filters for the active common-stock population.
    pub fn common_stocks() -> Self {
        Self {
            market: String::from("stocks"),
            security_type: String::from("CS"),
            active: true,
            page_size: LISTING_PAGE_SIZE,
            cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: PageCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

/// One page of the listing: symbols in provider order plus continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerPage {
    pub symbols: Vec<Symbol>,
    pub next: Option<PageCursor>,
}

/// Request payload for adjusted daily bars over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBarsRequest {
    pub symbol: Symbol,
    pub from: IsoDate,
    pub to: IsoDate,
}

impl DailyBarsRequest {
    pub fn new(symbol: Symbol, from: IsoDate, to: IsoDate) -> Result<Self, SourceError> {
        if from > to {
            return Err(SourceError::invalid_request(format!(
                "bars range start {from} is after end {to}"
            )));
        }
        Ok(Self { symbol, from, to })
    }
}

/// Capability surface a market-data provider adapter must implement.
///
/// All methods are read-only lookups against the provider. Faults are
/// reported through [`SourceError`]; callers decide whether a fault is
/// fatal (discovery) or isolated (per-symbol fetches).
pub trait MarketDataSource: Send + Sync {
    /// Fetch one page of the ticker listing.
    fn ticker_page<'a>(
        &'a self,
        request: TickerPageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TickerPage, SourceError>> + Send + 'a>>;

    /// Fetch reference metadata for a single symbol.
    fn ticker_details<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<MetadataRecord, SourceError>> + Send + 'a>>;

    /// Fetch adjusted daily bars for a symbol over an inclusive range.
    fn daily_bars<'a>(
        &'a self,
        request: DailyBarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DailyBar>, SourceError>> + Send + 'a>>;
}
