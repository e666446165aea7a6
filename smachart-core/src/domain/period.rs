//! SMA window length.

use std::fmt;
use std::num::NonZeroUsize;

use crate::indicators::IndicatorError;

/// Window length of a simple moving average. Always at least 1.
///
/// Tables key their SMA series by this value; the `SMA_{N}` string only
/// appears when a column has to be shown to a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmaPeriod(NonZeroUsize);

impl SmaPeriod {
    /// Validate a raw window length. Zero and negative values are rejected.
    pub fn new(period: i64) -> Result<Self, IndicatorError> {
        usize::try_from(period)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(IndicatorError::InvalidPeriod { period })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Column label used in table dumps and error messages.
    pub fn column_name(self) -> String {
        column_name(self.0.get() as i64)
    }
}

/// `SMA_{period}` for any raw period, valid or not.
pub fn column_name(period: i64) -> String {
    format!("SMA_{period}")
}

impl fmt::Display for SmaPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_period_accepted() {
        let p = SmaPeriod::new(20).unwrap();
        assert_eq!(p.get(), 20);
        assert_eq!(p.column_name(), "SMA_20");
    }

    #[test]
    fn zero_and_negative_rejected() {
        assert!(matches!(
            SmaPeriod::new(0),
            Err(IndicatorError::InvalidPeriod { period: 0 })
        ));
        assert!(matches!(
            SmaPeriod::new(-5),
            Err(IndicatorError::InvalidPeriod { period: -5 })
        ));
    }

    #[test]
    fn periods_order_by_length() {
        let short = SmaPeriod::new(5).unwrap();
        let long = SmaPeriod::new(50).unwrap();
        assert!(short < long);
    }
}
