//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a trailing window.
//! The first defined value sits at index period-1.

use super::IndicatorError;
use crate::domain::{SmaPeriod, TimeSeriesTable};

#[derive(Debug, Clone, Copy)]
pub struct Sma {
    period: SmaPeriod,
}

impl Sma {
    pub fn new(period: SmaPeriod) -> Self {
        Self { period }
    }

    /// Trailing mean of `values`, one entry per input.
    ///
    /// Entries before the window fills are `None`, as is any window that
    /// contains a NaN.
    pub fn compute(&self, values: &[f64]) -> Vec<Option<f64>> {
        let period = self.period.get();
        let n = values.len();
        let mut result = vec![None; n];

        if n < period {
            return result;
        }

        // Compute initial window sum
        let mut sum: f64 = values[..period].iter().sum();
        let mut nan_in_window = values[..period].iter().any(|v| v.is_nan());
        if !nan_in_window {
            result[period - 1] = Some(sum / period as f64);
        }

        // Roll the window forward
        for i in period..n {
            let leaving = values[i - period];
            let entering = values[i];

            if nan_in_window || leaving.is_nan() || entering.is_nan() {
                // A NaN poisons the running sum; rescan the window.
                let window = &values[i + 1 - period..=i];
                nan_in_window = window.iter().any(|v| v.is_nan());
                sum = window.iter().sum();
            } else {
                sum = sum - leaving + entering;
            }

            if !nan_in_window {
                result[i] = Some(sum / period as f64);
            }
        }

        result
    }
}

/// Add the `SMA_{period}` series of `close` to the table.
///
/// Consumes the table and hands it back with the series stored under the
/// period. Running it again with the same period replaces the series.
pub fn add_sma(mut table: TimeSeriesTable, period: i64) -> Result<TimeSeriesTable, IndicatorError> {
    let period = SmaPeriod::new(period)?;
    let sma = Sma::new(period);
    let values = sma.compute(&table.closes());

    let defined = values.iter().filter(|v| v.is_some()).count();
    tracing::info!(
        symbol = table.symbol(),
        column = %period.column_name(),
        rows = values.len(),
        defined,
        "computed simple moving average"
    );

    table.set_sma(period, values);
    Ok(table)
}
