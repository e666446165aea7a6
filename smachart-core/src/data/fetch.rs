//! Fetcher: one symbol's daily history as a [`TimeSeriesTable`].

use chrono::NaiveDate;
use thiserror::Error;

use super::provider::{FetchRequest, HistoricalPriceSource, ProviderError};
use crate::domain::TimeSeriesTable;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no data returned for '{symbol}' since {start}")]
    DataUnavailable { symbol: String, start: NaiveDate },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Fetch daily bars for `symbol` from `start` (inclusive) up to now.
pub fn fetch_stock_data(
    source: &dyn HistoricalPriceSource,
    symbol: &str,
    start: NaiveDate,
) -> Result<TimeSeriesTable, FetchError> {
    let today = chrono::Utc::now().date_naive();
    if start > today {
        return Err(ProviderError::InvalidRequest(format!(
            "start date {start} is in the future"
        ))
        .into());
    }
    // Include today's bar if the provider already has one.
    fetch_stock_data_between(source, symbol, start, today + chrono::Duration::days(1))
}

/// Fetch daily bars for `symbol` over `[start, end)`.
pub fn fetch_stock_data_between(
    source: &dyn HistoricalPriceSource,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<TimeSeriesTable, FetchError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ProviderError::InvalidRequest("ticker symbol is empty".into()).into());
    }
    if start >= end {
        return Err(ProviderError::InvalidRequest(format!(
            "empty date range: {start} to {end}"
        ))
        .into());
    }

    let request = FetchRequest::daily(symbol, start, end);
    let bars = source.fetch_daily(&request)?;
    let table = TimeSeriesTable::from_bars(symbol, bars);

    if table.is_empty() {
        return Err(FetchError::DataUnavailable {
            symbol: symbol.to_string(),
            start,
        });
    }

    tracing::info!(
        source = source.name(),
        symbol,
        %start,
        rows = table.len(),
        "fetched price history"
    );
    Ok(table)
}
