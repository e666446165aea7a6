//! Price source trait and structured error types.
//!
//! The HistoricalPriceSource trait abstracts over data sources (Yahoo Finance,
//! CSV import, in-memory fixtures) so the fetcher can be exercised without a
//! live network call.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Bar;

/// Bar interval requested from a source. Only daily bars are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    #[default]
    Daily,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Daily => "1d",
        }
    }
}

/// One history request: `symbol` over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub interval: Interval,
}

impl FetchRequest {
    pub fn daily(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            interval: Interval::Daily,
        }
    }

    /// True if `date` falls in `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Upstream failures. "No data" is not an error at this level: sources
/// return an empty vector and the fetcher decides what that means.
///
/// These are designed to be displayable in CLI output as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("could not set up HTTP client: {0}")]
    ClientSetup(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("provider returned HTTP {status}")]
    Http { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("csv import failed: {0}")]
    Csv(String),
}

/// Capability to load daily price history for one symbol.
///
/// Implementations return bars in whatever order they come; the fetcher
/// canonicalises them into a [`crate::domain::TimeSeriesTable`].
pub trait HistoricalPriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch daily bars for the request. An empty vector means the source
    /// has nothing for this symbol and range.
    fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<Bar>, ProviderError>;
}
