//! Run timing and summary reporting.
//!
//! Reporters are purely observational: they never affect control flow or what
//! gets written.

use crate::category::DatasetCategory;
use crate::ticker::Ticker;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of one fetch-normalize-write cycle.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticker: Ticker,
    pub category: DatasetCategory,
    pub rows: usize,
    pub elapsed: Duration,
}

/// Callbacks around scrape runs.
pub trait RunReporter {
    /// Called once a single-category run has written its artifact.
    fn on_complete(&self, summary: &RunSummary, artifact: &Path);

    /// Called after a multi-ticker batch, with the wall-clock time of the
    /// whole loop.
    fn on_batch_complete(&self, category: DatasetCategory, tickers: usize, elapsed: Duration);
}

/// Prints one timing line to stdout per invocation.
pub struct StdoutReporter;

impl RunReporter for StdoutReporter {
    fn on_complete(&self, summary: &RunSummary, artifact: &Path) {
        tracing::info!(
            ticker = %summary.ticker,
            rows = summary.rows,
            path = %artifact.display(),
            "artifact written"
        );
        println!("{}", single_line(summary.category, summary.elapsed));
    }

    fn on_batch_complete(&self, category: DatasetCategory, tickers: usize, elapsed: Duration) {
        tracing::info!(%category, tickers, "batch complete");
        println!("{}", batch_line(tickers, elapsed));
    }
}

/// `\n\n[Current] Time to read and write: 0.8123`
pub fn single_line(category: DatasetCategory, elapsed: Duration) -> String {
    format!(
        "\n\n[{}] Time to read and write: {}",
        category.label(),
        elapsed.as_secs_f64()
    )
}

/// `\n\nTime to read in 3 tickers: 4.02`
pub fn batch_line(tickers: usize, elapsed: Duration) -> String {
    format!("\n\nTime to read in {tickers} tickers: {}", elapsed.as_secs_f64())
}

/// Run `f`, returning its result with the elapsed wall-clock time.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
