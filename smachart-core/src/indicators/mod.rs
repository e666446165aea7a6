//! Indicator calculator.
//!
//! Indicators are pure functions over the close series: same length in,
//! same length out, `None` during warmup. Nothing at row t depends on rows
//! after t.

pub mod sma;

pub use sma::{add_sma, Sma};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("SMA period must be >= 1, got {period}")]
    InvalidPeriod { period: i64 },
}

/// Build a table from close prices on consecutive days for testing.
#[cfg(test)]
pub fn make_table(closes: &[f64]) -> crate::domain::TimeSeriesTable {
    use crate::domain::{Bar, TimeSeriesTable};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar::from_close(base_date + chrono::Duration::days(i as i64), close))
        .collect();
    TimeSeriesTable::from_bars("TEST", bars)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
