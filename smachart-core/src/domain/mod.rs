//! Domain types: bars, SMA periods, and the price table.

pub mod bar;
pub mod period;
pub mod table;

pub use bar::Bar;
pub use period::SmaPeriod;
pub use table::TimeSeriesTable;
