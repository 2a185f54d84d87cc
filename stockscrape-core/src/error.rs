//! Structured error types for scrape runs.
//!
//! Every failure is fatal to the invocation. `ScrapeError::kind` sorts the
//! variants into the three families callers care about: the filesystem, the
//! remote source, and the shape of the data in between.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`ScrapeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Filesystem,
    RemoteFetch,
    MalformedShape,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv serialization failed for {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("authentication required: {0}")]
    Authentication(String),

    #[error("malformed {dataset} data: {reason}")]
    MalformedShape { dataset: String, reason: String },

    #[error("ticker must not be empty")]
    EmptyTicker,
}

impl ScrapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CreateDir { .. } | Self::WriteFile { .. } | Self::Csv { .. } => {
                ErrorKind::Filesystem
            }
            Self::Network(_)
            | Self::Http { .. }
            | Self::SymbolNotFound { .. }
            | Self::ResponseFormat(_)
            | Self::Authentication(_) => ErrorKind::RemoteFetch,
            Self::MalformedShape { .. } | Self::EmptyTicker => ErrorKind::MalformedShape,
        }
    }

    pub(crate) fn malformed(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedShape {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }
}
