//! The shared scrape pipeline: resolve ticker directory → fetch → normalize →
//! write CSV → report timing.
//!
//! Every category goes through [`Scraper::run`]; the per-category entry points
//! differ only in which [`DatasetCategory`] they pass. There is no partial
//! success: the artifact is written only after fetch and normalization have
//! both succeeded.

use crate::category::DatasetCategory;
use crate::config::ScrapeConfig;
use crate::csv_writer::write_table;
use crate::error::ScrapeError;
use crate::fetch::DatasetSource;
use crate::normalize::normalize;
use crate::report::{timed, RunReporter, RunSummary};
use crate::store::TickerStore;
use crate::table::Table;
use crate::ticker::Ticker;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

pub struct Scraper<'a> {
    source: &'a dyn DatasetSource,
    store: TickerStore,
    history_start: NaiveDate,
}

impl<'a> Scraper<'a> {
    pub fn new(source: &'a dyn DatasetSource, config: &ScrapeConfig) -> Self {
        Self {
            source,
            store: TickerStore::new(&config.data_root),
            history_start: config.history_start,
        }
    }

    pub fn store(&self) -> &TickerStore {
        &self.store
    }

    /// One fetch-normalize-write cycle, without reporting.
    pub fn run(
        &self,
        ticker: &Ticker,
        category: DatasetCategory,
    ) -> Result<(RunSummary, PathBuf), ScrapeError> {
        let (result, elapsed) = timed(|| -> Result<(usize, PathBuf), ScrapeError> {
            self.store.ensure_dir(ticker)?;

            let raw = self.fetch(ticker, category)?;
            tracing::debug!(
                %ticker,
                %category,
                source = self.source.name(),
                rows = raw.num_rows(),
                "fetched"
            );

            let table = normalize(category, raw, Local::now().naive_local())?;
            let path = self.store.artifact_path(ticker, category);
            write_table(&table, &path, category.writes_index())?;
            Ok((table.num_rows(), path))
        });
        let (rows, path) = result?;

        Ok((
            RunSummary {
                ticker: ticker.clone(),
                category,
                rows,
                elapsed,
            },
            path,
        ))
    }

    /// Run one category for one ticker and report its timing.
    pub fn scrape(
        &self,
        ticker: &Ticker,
        category: DatasetCategory,
        reporter: &dyn RunReporter,
    ) -> Result<RunSummary, ScrapeError> {
        let (summary, path) = self.run(ticker, category)?;
        reporter.on_complete(&summary, &path);
        Ok(summary)
    }

    /// Historical series for each ticker in turn. The first failure aborts
    /// the batch; artifacts already written stay on disk. An empty list writes
    /// nothing and is not an error.
    pub fn scrape_history(
        &self,
        tickers: &[Ticker],
        reporter: &dyn RunReporter,
    ) -> Result<Vec<RunSummary>, ScrapeError> {
        let category = DatasetCategory::HistoricalSeries;
        let (result, elapsed) = timed(|| {
            tickers
                .iter()
                .map(|ticker| -> Result<RunSummary, ScrapeError> {
                    let (summary, path) = self.run(ticker, category)?;
                    tracing::info!(
                        %ticker,
                        rows = summary.rows,
                        path = %path.display(),
                        "history written"
                    );
                    Ok(summary)
                })
                .collect::<Result<Vec<_>, ScrapeError>>()
        });
        let summaries = result?;

        reporter.on_batch_complete(category, tickers.len(), elapsed);
        Ok(summaries)
    }

    fn fetch(&self, ticker: &Ticker, category: DatasetCategory) -> Result<Table, ScrapeError> {
        match category {
            DatasetCategory::CurrentQuote => self.source.fetch_quote(ticker),
            DatasetCategory::Financials => self.source.fetch_financials(ticker),
            DatasetCategory::HistoricalSeries => {
                let today = Local::now().date_naive();
                self.source.fetch_history(ticker, self.history_start, today)
            }
            DatasetCategory::ValuationStats => self.source.fetch_stats_valuation(ticker),
        }
    }
}
