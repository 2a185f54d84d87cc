use anyhow::Result;
use clap::Parser;
use stockscrape_core::DatasetCategory;

/// Current Data Scraper: write the quote snapshot for a ticker.
#[derive(Parser)]
#[command(name = "scrape_current")]
struct Cli {
    /// Input ticker.
    ticker: String,
}

fn main() -> Result<()> {
    stockscrape_cli::init_logging();
    let cli = Cli::parse();
    stockscrape_cli::run_single(&cli.ticker, DatasetCategory::CurrentQuote)
}
