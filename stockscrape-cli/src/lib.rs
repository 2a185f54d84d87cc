//! Shared bootstrap for the scrape binaries.
//!
//! Commands:
//! - `scrape_current <TICKER>` — quote snapshot → `<TICKER>_cur.csv`
//! - `scrape_financials <TICKER>` — financial statements → `<TICKER>_finance.csv`
//! - `scrape_historical [TICKER...]` — daily series since 1970 → `<TICKER>_hist.csv`
//! - `scrape_stats_val <TICKER>` — valuation measures → `<TICKER>_stats_val.csv`

use anyhow::Result;
use stockscrape_core::{
    DatasetCategory, ScrapeConfig, Scraper, StdoutReporter, Ticker, YahooSource,
};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so stdout carries only the timing line.
/// Quiet by default; `RUST_LOG` raises the level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Scrape one single-ticker category with the default configuration.
pub fn run_single(symbol: &str, category: DatasetCategory) -> Result<()> {
    let ticker = Ticker::new(symbol)?;
    let config = ScrapeConfig::default();
    let source = YahooSource::new(&config)?;
    Scraper::new(&source, &config).scrape(&ticker, category, &StdoutReporter)?;
    Ok(())
}
