//! In-memory price source for tests and demos.

use std::collections::HashMap;

use super::provider::{FetchRequest, HistoricalPriceSource, ProviderError};
use crate::domain::Bar;

/// Serves fixed bars per symbol, filtered to the requested range.
/// Unknown symbols have no data.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    bars: HashMap<String, Vec<Bar>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the bars served for `symbol`.
    pub fn with_symbol(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }
}

impl HistoricalPriceSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<Bar>, ProviderError> {
        Ok(self
            .bars
            .get(&request.symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| request.contains(b.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn filters_to_requested_range() {
        let source = StaticSource::new().with_symbol(
            "AAPL",
            (1..=10).map(|d| Bar::from_close(day(d), d as f64)).collect(),
        );
        let bars = source
            .fetch_daily(&FetchRequest::daily("AAPL", day(3), day(6)))
            .unwrap();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn unknown_symbol_is_empty() {
        let source = StaticSource::new();
        let bars = source
            .fetch_daily(&FetchRequest::daily("ZZZZ_INVALID", day(1), day(2)))
            .unwrap();
        assert!(bars.is_empty());
    }
}
