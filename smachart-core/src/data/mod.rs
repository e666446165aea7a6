//! Price sources and the fetcher that turns their bars into a table.

pub mod canonicalize;
pub mod csv_source;
pub mod fetch;
pub mod provider;
pub mod static_source;
pub mod yahoo;

pub use csv_source::CsvSource;
pub use fetch::{fetch_stock_data, fetch_stock_data_between, FetchError};
pub use provider::{FetchRequest, HistoricalPriceSource, Interval, ProviderError};
pub use static_source::StaticSource;
pub use yahoo::YahooProvider;
