use anyhow::Result;
use clap::Parser;
use stockscrape_core::DatasetCategory;

/// Financials Scraper: write flattened financial statements for a ticker.
#[derive(Parser)]
#[command(name = "scrape_financials")]
struct Cli {
    /// Input ticker.
    ticker: String,
}

fn main() -> Result<()> {
    stockscrape_cli::init_logging();
    let cli = Cli::parse();
    stockscrape_cli::run_single(&cli.ticker, DatasetCategory::Financials)
}
