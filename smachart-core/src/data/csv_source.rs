//! CSV file price source.
//!
//! Expected header: `date,open,high,low,close,volume[,adj_close]` with ISO
//! dates. A missing `adj_close` column defaults to `close`. The file holds
//! one symbol; the request symbol is only used for messages.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::{FetchRequest, HistoricalPriceSource, ProviderError};
use crate::domain::Bar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    #[serde(default)]
    adj_close: Option<f64>,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            adj_close: row.adj_close.unwrap_or(row.close),
        }
    }
}

/// Reads daily bars from a CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<Bar>, ProviderError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| ProviderError::Csv(format!("{}: {e}", self.path.display())))?;

        reader
            .deserialize::<CsvRow>()
            .map(|row| {
                row.map(Bar::from)
                    .map_err(|e| ProviderError::Csv(format!("{}: {e}", self.path.display())))
            })
            .collect()
    }
}

impl HistoricalPriceSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<Bar>, ProviderError> {
        let bars = self.read_all()?;
        tracing::debug!(
            path = %self.path.display(),
            symbol = %request.symbol,
            rows = bars.len(),
            "read csv bars"
        );
        Ok(bars.into_iter().filter(|b| request.contains(b.date)).collect())
    }
}
