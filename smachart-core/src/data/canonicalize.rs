//! Canonical ordering for provider bars: sorted, unique dates, finite close.

use crate::domain::Bar;

/// Bars after canonicalisation, with counts of what was thrown away.
#[derive(Debug, Clone, Default)]
pub struct CanonicalBars {
    pub bars: Vec<Bar>,
    pub duplicates_dropped: usize,
    pub invalid_dropped: usize,
}

/// Sort ascending by date, keep the first bar seen for each date, and drop
/// bars whose close is not a finite number.
///
/// The sort is stable, so "first seen" means first in provider order.
pub fn canonicalize(mut bars: Vec<Bar>) -> CanonicalBars {
    let before = bars.len();
    bars.retain(Bar::has_valid_close);
    let invalid_dropped = before - bars.len();

    bars.sort_by_key(|b| b.date);

    let before = bars.len();
    bars.dedup_by(|later, earlier| later.date == earlier.date);
    let duplicates_dropped = before - bars.len();

    CanonicalBars {
        bars,
        duplicates_dropped,
        invalid_dropped,
    }
}
