//! Orchestrator: fetch → SMA → chart, in that order, once.

use std::io::Write;

use smachart_core::chart::{show_data_with_sma, ChartError, ChartRenderer};
use smachart_core::data::{fetch_stock_data, FetchError, HistoricalPriceSource};
use smachart_core::indicators::{add_sma, IndicatorError};
use smachart_core::TimeSeriesTable;
use thiserror::Error;

use crate::config::PipelineConfig;

/// Any failure that stops a pipeline run. Each step's error is kept intact.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("indicator failed: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("chart failed: {0}")]
    Chart(#[from] ChartError),
}

/// Run the full pipeline for `config`.
///
/// Every error propagates; a failing step leaves the later steps unrun.
/// Returns the final table (with its SMA series) after the chart closes.
pub fn run_pipeline<R: ChartRenderer + ?Sized>(
    config: &PipelineConfig,
    source: &dyn HistoricalPriceSource,
    renderer: &mut R,
) -> Result<TimeSeriesTable, PipelineError> {
    tracing::info!(
        ticker = %config.ticker,
        start = %config.start_date,
        window = config.sma_window,
        source = source.name(),
        "starting pipeline"
    );

    let table = fetch_stock_data(source, &config.ticker, config.start_date)?;
    let table = add_sma(table, config.sma_window)?;
    let table = show_data_with_sma(table, config.sma_window, renderer)?;

    Ok(table)
}

/// Fetch `config.ticker` and dump the table to `out`.
///
/// Fetch errors of either kind are written as a one-line message instead
/// of being returned; only I/O errors on `out` escape. Returns whether a
/// table was written.
pub fn fetch_and_print<W: Write + ?Sized>(
    config: &PipelineConfig,
    source: &dyn HistoricalPriceSource,
    out: &mut W,
) -> std::io::Result<bool> {
    match fetch_stock_data(source, &config.ticker, config.start_date) {
        Ok(table) => {
            writeln!(out, "{table}")?;
            Ok(true)
        }
        Err(e) => {
            tracing::warn!(ticker = %config.ticker, error = %e, "fetch failed");
            writeln!(out, "An error occurred: {e}")?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smachart_core::chart::ChartSpec;
    use smachart_core::data::StaticSource;
    use smachart_core::Bar;

    struct CountingRenderer(usize);

    impl ChartRenderer for CountingRenderer {
        fn render(&mut self, _spec: &ChartSpec) -> Result<(), ChartError> {
            self.0 += 1;
            Ok(())
        }
    }

    fn config(window: i64) -> PipelineConfig {
        PipelineConfig {
            sma_window: window,
            ..PipelineConfig::default()
        }
    }

    fn source() -> StaticSource {
        let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let bars = (0..5)
            .map(|i| Bar::from_close(start + chrono::Duration::days(i), 100.0 + i as f64))
            .collect();
        StaticSource::new().with_symbol("AAPL", bars)
    }

    #[test]
    fn invalid_window_stops_before_chart() {
        let mut renderer = CountingRenderer(0);
        let err = run_pipeline(&config(0), &source(), &mut renderer).unwrap_err();
        assert!(matches!(err, PipelineError::Indicator(_)));
        assert_eq!(renderer.0, 0);
    }

    #[test]
    fn error_message_names_the_step() {
        let mut renderer = CountingRenderer(0);
        let err = run_pipeline(&config(-1), &source(), &mut renderer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "indicator failed: SMA period must be >= 1, got -1"
        );
    }

    #[test]
    fn fetch_and_print_writes_table() {
        let mut out = Vec::new();
        let printed = fetch_and_print(&config(3), &source(), &mut out).unwrap();
        assert!(printed);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[5 rows x 6 columns]"));
    }
}
