use serde::{Deserialize, Serialize};

use crate::domain::{IsoDate, Symbol};
use crate::provider::SourceError;

/// One security's descriptive and financial attributes as reported by the
/// provider at fetch time. Values are carried verbatim; admission rules live
/// in the filter stage.
///
/// Field order here is the column order of the persisted universe table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub symbol: Symbol,
    pub active: bool,
    pub security_type: String,
    pub market_cap: Option<f64>,
    pub primary_exchange: String,
    pub industry_description: Option<String>,
    pub list_date: Option<IsoDate>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub employee_count: Option<u64>,
    pub shares_outstanding: Option<f64>,
    pub weighted_shares_outstanding: Option<f64>,
}

/// Result of one metadata fetch attempt.
///
/// Failure is a value here, not a control-flow interrupt: one unfetchable
/// symbol must not abort the thousands of lookups around it.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(MetadataRecord),
    Failure { symbol: Symbol, reason: SourceError },
}

impl FetchOutcome {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Success(record) => &record.symbol,
            Self::Failure { symbol, .. } => symbol,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// One adjusted daily OHLCV aggregate, carried verbatim from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: IsoDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Daily series for one symbol, in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBars {
    pub symbol: Symbol,
    pub bars: Vec<DailyBar>,
}
