use anyhow::Result;
use clap::Parser;
use stockscrape_core::{ScrapeConfig, Scraper, StdoutReporter, Ticker, YahooSource};

/// Historical Scraper: write the daily series since 1970-01-01 for each ticker.
#[derive(Parser)]
#[command(name = "scrape_historical")]
struct Cli {
    /// List of tickers, fetched one after another.
    tickers: Vec<String>,
}

fn main() -> Result<()> {
    stockscrape_cli::init_logging();
    let cli = Cli::parse();

    // Reject blank symbols before any network or disk access.
    let tickers = cli
        .tickers
        .iter()
        .map(|s| Ticker::new(s))
        .collect::<Result<Vec<_>, _>>()?;

    let config = ScrapeConfig::default();
    let source = YahooSource::new(&config)?;
    Scraper::new(&source, &config).scrape_history(&tickers, &StdoutReporter)?;
    Ok(())
}
