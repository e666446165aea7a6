//! Chart model for close price with its SMA, and the visualizer step.
//!
//! The model is surface-agnostic: a [`ChartRenderer`] decides where it ends
//! up. `smachart-tui` draws it in the terminal; tests record it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::period::column_name;
use crate::domain::{SmaPeriod, TimeSeriesTable};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("required column '{column}' is missing")]
    MissingColumn { column: String },

    #[error("failed to render chart: {0}")]
    Render(String),
}

/// One labeled line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl ChartSeries {
    /// Smallest and largest y value, or `None` for an empty series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|&(_, v)| v).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Everything a surface needs to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Close price and `SMA_{period}` against date.
    ///
    /// Rows where the SMA is undefined are left out of the SMA line rather
    /// than plotted as zero.
    pub fn price_with_sma(table: &TimeSeriesTable, period: i64) -> Result<Self, ChartError> {
        let missing = || ChartError::MissingColumn {
            column: column_name(period),
        };
        let period = SmaPeriod::new(period).map_err(|_| missing())?;
        let sma = table.sma(period).ok_or_else(missing)?;

        let close = ChartSeries {
            label: "Close Price".to_string(),
            points: table.bars().iter().map(|b| (b.date, b.close)).collect(),
        };
        let average = ChartSeries {
            label: format!("{period}-Day SMA"),
            points: table
                .dates()
                .zip(sma.iter())
                .filter_map(|(date, v)| v.map(|v| (date, v)))
                .collect(),
        };

        Ok(Self {
            title: format!("Stock Price with {period}-Day SMA"),
            x_label: "Date".to_string(),
            y_label: "Price".to_string(),
            grid: true,
            series: vec![close, average],
        })
    }

    /// First and last date across all series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.series.iter().flat_map(|s| s.points.iter().map(|&(d, _)| d));
        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    /// Smallest and largest y value across all series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .filter_map(ChartSeries::value_range)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

/// A surface that can show a chart. Rendering may block (e.g. until the
/// user dismisses a window).
pub trait ChartRenderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<(), ChartError>;
}

/// Chart close and `SMA_{period}` on `renderer`, then hand the table back.
///
/// Nothing is rendered when the SMA column is missing.
pub fn show_data_with_sma<R: ChartRenderer + ?Sized>(
    table: TimeSeriesTable,
    period: i64,
    renderer: &mut R,
) -> Result<TimeSeriesTable, ChartError> {
    let spec = ChartSpec::price_with_sma(&table, period)?;
    tracing::info!(symbol = table.symbol(), title = %spec.title, "rendering chart");
    renderer.render(&spec)?;
    Ok(table)
}
