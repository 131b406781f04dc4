//! # Domain Models
//!
//! Canonical domain types for the universe pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, normalized ticker symbol |
//! | [`IsoDate`] | Calendar date in ISO form (YYYY-MM-DD) |
//! | [`MetadataRecord`] | Per-security attributes reported by the provider |
//! | [`FetchOutcome`] | Success-or-isolated-failure result of one metadata fetch |
//! | [`DailyBar`] | Adjusted daily OHLCV aggregate |
//! | [`SymbolBars`] | Daily series for one symbol |

mod date;
mod models;
mod symbol;

pub use date::IsoDate;
pub use models::{DailyBar, FetchOutcome, MetadataRecord, SymbolBars};
pub use symbol::Symbol;
