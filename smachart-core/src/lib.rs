//! smachart core — price table, fetcher, SMA indicator, chart model.
//!
//! This crate holds every step of the pipeline except the terminal surface:
//! - Domain types (bars, SMA periods, the date-ordered price table)
//! - Price sources behind `HistoricalPriceSource` (Yahoo Finance, CSV, in-memory)
//! - The fetcher that canonicalises source bars into a table
//! - The SMA indicator calculator
//! - The chart model and the `ChartRenderer` seam used by the visualizer

pub mod chart;
pub mod data;
pub mod domain;
pub mod indicators;

pub use chart::{show_data_with_sma, ChartError, ChartRenderer, ChartSeries, ChartSpec};
pub use data::{fetch_stock_data, FetchError, HistoricalPriceSource, ProviderError};
pub use domain::{Bar, SmaPeriod, TimeSeriesTable};
pub use indicators::{add_sma, IndicatorError};
