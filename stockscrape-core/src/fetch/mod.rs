//! Dataset fetchers.
//!
//! The `DatasetSource` trait abstracts over where the four dataset categories
//! come from, so the pipeline can be driven by Yahoo Finance in production and
//! by an in-memory fixture in tests.

pub mod financials;
pub mod quote;
mod session;
pub mod valuation;
pub mod wire;
pub mod yahoo;

pub use yahoo::YahooSource;

use crate::error::ScrapeError;
use crate::table::Table;
use crate::ticker::Ticker;
use chrono::NaiveDate;

/// Columns of a historical series, after the `date` index.
pub const HISTORY_COLUMNS: [&str; 7] =
    ["open", "high", "low", "close", "adjclose", "volume", "ticker"];

/// Columns of the flattened financial statements.
pub const FINANCIALS_COLUMNS: [&str; 4] = ["statement", "period_ending", "line_item", "value"];

/// Columns of the current quote snapshot.
pub const QUOTE_COLUMNS: [&str; 2] = ["attribute", "value"];

/// One remote call per dataset category. Every call is blocking and
/// single-shot: errors are returned as-is, never retried.
pub trait DatasetSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Snapshot of named quote fields as an `attribute, value` table.
    fn fetch_quote(&self, ticker: &Ticker) -> Result<Table, ScrapeError>;

    /// Income statement, balance sheet and cash flow, yearly and quarterly,
    /// flattened into one table.
    fn fetch_financials(&self, ticker: &Ticker) -> Result<Table, ScrapeError>;

    /// Daily OHLCV rows indexed by date, `start..=end`.
    fn fetch_history(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Table, ScrapeError>;

    /// Two-column valuation-measures table; the second header carries the
    /// as-of date.
    fn fetch_stats_valuation(&self, ticker: &Ticker) -> Result<Table, ScrapeError>;
}
