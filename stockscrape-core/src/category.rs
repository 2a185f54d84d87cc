//! The fixed set of dataset categories and their per-category conventions.

use std::fmt;

/// One kind of remote dataset, each with its own fetch, normalization rule
/// and output filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetCategory {
    CurrentQuote,
    Financials,
    HistoricalSeries,
    ValuationStats,
}

impl DatasetCategory {
    pub const ALL: [DatasetCategory; 4] = [
        DatasetCategory::CurrentQuote,
        DatasetCategory::Financials,
        DatasetCategory::HistoricalSeries,
        DatasetCategory::ValuationStats,
    ];

    /// Filename suffix: `<ticker>_<suffix>.csv`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::CurrentQuote => "cur",
            Self::Financials => "finance",
            Self::HistoricalSeries => "hist",
            Self::ValuationStats => "stats_val",
        }
    }

    /// Bracketed tag used in the timing summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentQuote => "Current",
            Self::Financials => "Financials",
            Self::HistoricalSeries => "Historical",
            Self::ValuationStats => "Stats Valuation",
        }
    }

    /// Whether the row index is written as a leading CSV column.
    pub fn writes_index(self) -> bool {
        matches!(self, Self::HistoricalSeries | Self::ValuationStats)
    }
}

impl fmt::Display for DatasetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
