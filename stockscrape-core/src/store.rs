//! Per-ticker storage layout.
//!
//! Layout: `{data_root}/{TICKER}/{TICKER}_{suffix}.csv`
//!
//! Directories are created lazily and never cleaned up.

use crate::category::DatasetCategory;
use crate::error::ScrapeError;
use crate::ticker::Ticker;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves and creates the on-disk home of each ticker's artifacts.
#[derive(Debug, Clone)]
pub struct TickerStore {
    data_root: PathBuf,
}

impl TickerStore {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Directory for a ticker: `{data_root}/{TICKER}/`. Does not touch the disk.
    pub fn ticker_dir(&self, ticker: &Ticker) -> PathBuf {
        self.data_root.join(ticker.as_str())
    }

    /// Create the ticker directory (and parents) if missing. Idempotent.
    pub fn ensure_dir(&self, ticker: &Ticker) -> Result<PathBuf, ScrapeError> {
        let dir = self.ticker_dir(ticker);
        fs::create_dir_all(&dir).map_err(|source| ScrapeError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    /// Path of the CSV artifact for a ticker and category.
    pub fn artifact_path(&self, ticker: &Ticker, category: DatasetCategory) -> PathBuf {
        self.ticker_dir(ticker)
            .join(format!("{ticker}_{}.csv", category.suffix()))
    }
}
