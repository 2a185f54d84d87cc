//! stockscrape core — fetch one category of market data for a ticker and
//! persist it as CSV.
//!
//! This crate contains the whole ingestion path:
//! - Ticker store layout (`data/stock_info/<TICKER>/`)
//! - Dataset sources (Yahoo Finance chart + quoteSummary APIs)
//! - Category-specific normalization
//! - Atomic CSV writing
//! - Run timing and reporting

pub mod category;
pub mod config;
pub mod csv_writer;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod table;
pub mod ticker;

pub use category::DatasetCategory;
pub use config::ScrapeConfig;
pub use error::{ErrorKind, ScrapeError};
pub use fetch::{DatasetSource, YahooSource};
pub use pipeline::Scraper;
pub use report::{RunReporter, RunSummary, StdoutReporter};
pub use store::TickerStore;
pub use table::{RowIndex, Table};
pub use ticker::Ticker;
