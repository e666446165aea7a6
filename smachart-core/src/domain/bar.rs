//! Bar — one trading day of provider data.

use chrono::NaiveDate;

/// Daily OHLCV bar as returned by a price source.
///
/// Only `close` feeds the indicator; the other columns are passed through
/// untouched so the table dump shows everything the provider sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adj_close: f64,
}

impl Bar {
    /// Bar with every price column set to `close`. Handy for sources that
    /// only know a closing price.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
            adj_close: close,
        }
    }

    /// Returns true if the close can take part in an average.
    pub fn has_valid_close(&self) -> bool {
        self.close.is_finite()
    }
}
