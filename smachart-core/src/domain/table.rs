//! TimeSeriesTable — date-ordered bars plus derived SMA series.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::{Bar, SmaPeriod};
use crate::data::canonicalize::canonicalize;

/// Provider columns in display order. `date` is the row key, not a column.
pub const BASE_COLUMNS: [&str; 6] = ["open", "high", "low", "close", "adj_close", "volume"];

/// Rows shown at each end of a truncated dump.
const DUMP_EDGE_ROWS: usize = 5;

/// Daily price table for one symbol.
///
/// Invariants (enforced by [`TimeSeriesTable::from_bars`]):
/// - rows are sorted ascending by date with no duplicate dates
/// - every `close` is finite
/// - every SMA series has exactly one entry per row
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    symbol: String,
    bars: Vec<Bar>,
    sma: BTreeMap<SmaPeriod, Vec<Option<f64>>>,
}

impl TimeSeriesTable {
    /// Build a table from bars in any order.
    ///
    /// Bars are sorted, deduplicated (first occurrence wins) and stripped of
    /// rows without a usable close.
    pub fn from_bars(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        let symbol = symbol.into();
        let canonical = canonicalize(bars);
        if canonical.duplicates_dropped > 0 {
            tracing::warn!(
                symbol = %symbol,
                dropped = canonical.duplicates_dropped,
                "dropped bars with duplicate dates"
            );
        }
        if canonical.invalid_dropped > 0 {
            tracing::warn!(
                symbol = %symbol,
                dropped = canonical.invalid_dropped,
                "dropped bars without a finite close"
            );
        }
        Self {
            symbol,
            bars: canonical.bars,
            sma: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// SMA series for `period`, if it has been computed.
    pub fn sma(&self, period: SmaPeriod) -> Option<&[Option<f64>]> {
        self.sma.get(&period).map(|v| v.as_slice())
    }

    /// Periods with a stored series, shortest first.
    pub fn sma_periods(&self) -> impl Iterator<Item = SmaPeriod> + '_ {
        self.sma.keys().copied()
    }

    /// Store (or replace) the series for `period`.
    pub(crate) fn set_sma(&mut self, period: SmaPeriod, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.bars.len(), "SMA series length mismatch");
        self.sma.insert(period, values);
    }

    /// Column names in display order: provider columns, then `SMA_{N}`.
    pub fn column_names(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.sma.keys().map(|p| p.column_name()))
            .collect()
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, i: usize) -> fmt::Result {
        let bar = &self.bars[i];
        write!(
            f,
            "{:<10} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.adj_close, bar.volume
        )?;
        for series in self.sma.values() {
            match series[i] {
                Some(v) => write!(f, " {v:>12.4}")?,
                None => write!(f, " {:>12}", "NaN")?,
            }
        }
        writeln!(f)
    }
}

/// Dataframe-style dump: header, head and tail rows, and a shape footer.
impl fmt::Display for TimeSeriesTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.column_names();

        write!(f, "{:<10}", "date")?;
        for name in &columns {
            write!(f, " {name:>12}")?;
        }
        writeln!(f)?;

        let n = self.bars.len();
        if n > DUMP_EDGE_ROWS * 2 {
            for i in 0..DUMP_EDGE_ROWS {
                self.write_row(f, i)?;
            }
            write!(f, "{:<10}", "...")?;
            for _ in &columns {
                write!(f, " {:>12}", "...")?;
            }
            writeln!(f)?;
            for i in n - DUMP_EDGE_ROWS..n {
                self.write_row(f, i)?;
            }
        } else {
            for i in 0..n {
                self.write_row(f, i)?;
            }
        }

        writeln!(f)?;
        write!(f, "[{} rows x {} columns]", n, columns.len())
    }
}
