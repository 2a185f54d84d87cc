//! Category-specific reshaping between fetch and write.
//!
//! Each category first has its shape contract checked, then is reshaped:
//! - Current quote: a `Timestamp` row is placed first
//! - Financials, historical series: passed through
//! - Valuation stats: headers renamed, then transposed
//!
//! A table that violates its contract fails with a malformed-shape error; no
//! repair is attempted.

use crate::category::DatasetCategory;
use crate::error::ScrapeError;
use crate::fetch::{FINANCIALS_COLUMNS, HISTORY_COLUMNS, QUOTE_COLUMNS};
use crate::table::{row, Table};
use chrono::NaiveDateTime;

/// Format of the run timestamp in the current quote artifact.
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y, %H:%M:%S";

/// Character range of the valuation header that holds the as-of date.
const STATS_LABEL_START: usize = 12;
const STATS_LABEL_LEN: usize = 10;

/// Reshape `table` for `category`. `run_time` stamps the current quote.
pub fn normalize(
    category: DatasetCategory,
    table: Table,
    run_time: NaiveDateTime,
) -> Result<Table, ScrapeError> {
    match category {
        DatasetCategory::CurrentQuote => normalize_quote(table, run_time),
        DatasetCategory::Financials => normalize_financials(table),
        DatasetCategory::HistoricalSeries => normalize_history(table),
        DatasetCategory::ValuationStats => normalize_stats_valuation(table),
    }
}

pub fn normalize_quote(mut table: Table, run_time: NaiveDateTime) -> Result<Table, ScrapeError> {
    let dataset = DatasetCategory::CurrentQuote.suffix();
    table.expect_columns(dataset, &QUOTE_COLUMNS)?;
    let stamp = run_time.format(TIMESTAMP_FORMAT).to_string();
    table.insert_row(0, row(["Timestamp".to_string(), stamp]), None)?;
    Ok(table)
}

pub fn normalize_financials(table: Table) -> Result<Table, ScrapeError> {
    table.expect_columns(DatasetCategory::Financials.suffix(), &FINANCIALS_COLUMNS)?;
    Ok(table)
}

pub fn normalize_history(table: Table) -> Result<Table, ScrapeError> {
    let dataset = DatasetCategory::HistoricalSeries.suffix();
    table.expect_columns(dataset, &HISTORY_COLUMNS)?;
    if table.index().is_none() {
        return Err(ScrapeError::malformed(dataset, "series has no date index"));
    }
    Ok(table)
}

/// Rename the first header to `Date`, cut the as-of date out of the second
/// header, then transpose so the headers become the row index.
///
/// The cut assumes the upstream header layout `As of Date: MM/DD/YYYY...`.
/// A header shorter than 22 characters is rejected rather than guessed at.
pub fn normalize_stats_valuation(mut table: Table) -> Result<Table, ScrapeError> {
    let dataset = DatasetCategory::ValuationStats.suffix();
    table.expect_column_count(dataset, 2)?;

    let token = date_token(&table.columns()[1]).ok_or_else(|| {
        ScrapeError::malformed(
            dataset,
            format!(
                "header {:?} is shorter than {} characters",
                table.columns()[1],
                STATS_LABEL_START + STATS_LABEL_LEN
            ),
        )
    })?;

    table.rename_column(0, "Date")?;
    table.rename_column(1, token)?;
    Ok(table.transpose(""))
}

/// Characters `12..22` of a header, if it is long enough.
pub fn date_token(label: &str) -> Option<String> {
    let token: String = label
        .chars()
        .skip(STATS_LABEL_START)
        .take(STATS_LABEL_LEN)
        .collect();
    (token.chars().count() == STATS_LABEL_LEN).then_some(token)
}
