use thiserror::Error;

use crate::provider::SourceError;

/// Validation errors for domain newtypes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be ISO calendar form YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
}

/// Fatal faults while paginating the ticker listing.
///
/// A partial listing is never returned. Ranking over an incomplete
/// population would be silently wrong, so any page fault fails the whole
/// discovery pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("ticker listing failed on page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: SourceError,
    },

    #[error("ticker listing repeated its pagination cursor on page {page}")]
    CursorLoop { page: usize },
}

/// Whole-pipeline failures from the universe builder.
#[derive(Debug, Error)]
pub enum UniverseError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Discovery succeeded but returned zero symbols. Distinct from a
    /// discovery fault: the listing call worked, the population is empty.
    #[error("discovery returned no symbols; there is nothing to rank")]
    EmptyUniverse,
}

/// Failures while persisting pipeline artifacts.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
