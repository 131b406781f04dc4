//! CSV persistence for pipeline artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{IsoDate, SymbolBars};
use crate::error::SinkError;
use crate::universe::Universe;

/// Default path for the ranked universe table.
pub const DEFAULT_UNIVERSE_PATH: &str = "data/stock_metadata.csv";

/// Default path for the daily bars table.
pub const DEFAULT_BARS_PATH: &str = "data/daily_ohlcv.csv";

/// Universe column names, in [`crate::domain::MetadataRecord`] field order.
/// Written explicitly so an empty universe still produces a headered table.
const UNIVERSE_HEADER: [&str; 12] = [
    "symbol",
    "active",
    "security_type",
    "market_cap",
    "primary_exchange",
    "industry_description",
    "list_date",
    "display_name",
    "description",
    "employee_count",
    "shares_outstanding",
    "weighted_shares_outstanding",
];

const BARS_HEADER: [&str; 7] = ["ticker", "date", "open", "high", "low", "close", "volume"];

/// Writes pipeline artifacts as headered CSV.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// failed run never leaves a partial table at the destination. A rerun
/// replaces the previous artifact wholesale.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the ranked universe, one row per admitted record in rank
    /// order. Absent optional fields serialize as empty columns.
    pub fn write_universe(&self, universe: &Universe) -> Result<PathBuf, SinkError> {
        self.write_atomically(&UNIVERSE_HEADER, |writer| {
            for record in universe.records() {
                writer.serialize(record)?;
            }
            Ok(())
        })
    }

    /// Writes daily series as flat rows, grouped per symbol in input order.
    pub fn write_daily_bars(&self, series: &[SymbolBars]) -> Result<PathBuf, SinkError> {
        self.write_atomically(&BARS_HEADER, |writer| {
            for entry in series {
                for bar in &entry.bars {
                    writer.serialize(BarRow {
                        ticker: entry.symbol.as_str(),
                        date: bar.date,
                        open: bar.open,
                        high: bar.high,
                        low: bar.low,
                        close: bar.close,
                        volume: bar.volume,
                    })?;
                }
            }
            Ok(())
        })
    }

    fn write_atomically<F>(&self, header: &[&str], write_rows: F) -> Result<PathBuf, SinkError>
    where
        F: FnOnce(&mut csv::Writer<fs::File>) -> Result<(), csv::Error>,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let staging = self.path.with_extension("tmp");
        if let Err(error) = write_staging(&staging, header, write_rows) {
            let _ = fs::remove_file(&staging);
            return Err(error);
        }

        fs::rename(&staging, &self.path)?;
        tracing::info!(path = %self.path.display(), "artifact written");
        Ok(self.path.clone())
    }
}

fn write_staging<F>(staging: &Path, header: &[&str], write_rows: F) -> Result<(), SinkError>
where
    F: FnOnce(&mut csv::Writer<fs::File>) -> Result<(), csv::Error>,
{
    let file = fs::File::create(staging)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(header)?;
    write_rows(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Flattened daily-bars row: one bar per line, keyed by ticker and date.
#[derive(Debug, Serialize)]
struct BarRow<'a> {
    ticker: &'a str,
    date: IsoDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}
