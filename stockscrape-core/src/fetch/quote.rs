//! Current quote snapshot, assembled from `quoteSummary` modules into the
//! summary-table layout of the Yahoo quote page.

use super::wire::{display_value, raw_value};
use super::QUOTE_COLUMNS;
use crate::error::ScrapeError;
use crate::table::{row, Table};
use serde_json::{Map, Value};

/// Modules requested for a quote snapshot.
pub const QUOTE_MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,calendarEvents";

const NOT_AVAILABLE: &str = "N/A";

/// Build the `attribute, value` snapshot table. Fields missing upstream read
/// `N/A`; rows are sorted by attribute.
pub fn quote_table(modules: &Map<String, Value>) -> Result<Table, ScrapeError> {
    let price = modules
        .get("price")
        .ok_or_else(|| ScrapeError::ResponseFormat("quote has no price module".into()))?;
    let empty = Value::Object(Map::new());
    let detail = modules.get("summaryDetail").unwrap_or(&empty);
    let stats = modules.get("defaultKeyStatistics").unwrap_or(&empty);
    let financial = modules.get("financialData").unwrap_or(&empty);
    let calendar = modules.get("calendarEvents").unwrap_or(&empty);

    let fields: Vec<(&str, Option<String>)> = vec![
        ("1y Target Est", display_value(financial, "targetMeanPrice")),
        (
            "52 Week Range",
            joined(detail, "fiftyTwoWeekLow", "fiftyTwoWeekHigh", " - "),
        ),
        ("Ask", joined(detail, "ask", "askSize", " x ")),
        ("Avg. Volume", display_value(detail, "averageVolume")),
        ("Beta (5Y Monthly)", display_value(detail, "beta")),
        ("Bid", joined(detail, "bid", "bidSize", " x ")),
        ("Day's Range", joined(detail, "dayLow", "dayHigh", " - ")),
        ("EPS (TTM)", display_value(stats, "trailingEps")),
        ("Earnings Date", earnings_dates(calendar)),
        ("Ex-Dividend Date", display_value(detail, "exDividendDate")),
        ("Forward Dividend & Yield", dividend(detail)),
        ("Market Cap", display_value(price, "marketCap")),
        ("Open", display_value(price, "regularMarketOpen")),
        ("PE Ratio (TTM)", display_value(detail, "trailingPE")),
        ("Previous Close", display_value(price, "regularMarketPreviousClose")),
        (
            "Quote Price",
            raw_value(price, "regularMarketPrice").map(|p| p.to_string()),
        ),
        ("Volume", display_value(price, "regularMarketVolume")),
    ];

    let mut rows: Vec<Vec<String>> = fields
        .into_iter()
        .map(|(attr, value)| {
            row([attr.to_string(), value.unwrap_or_else(|| NOT_AVAILABLE.into())])
        })
        .collect();
    rows.sort_by(|a, b| a[0].cmp(&b[0]));

    Table::new(row(QUOTE_COLUMNS), rows)
}

fn joined(module: &Value, first: &str, second: &str, sep: &str) -> Option<String> {
    Some(format!(
        "{}{sep}{}",
        display_value(module, first)?,
        display_value(module, second)?
    ))
}

fn dividend(detail: &Value) -> Option<String> {
    Some(format!(
        "{} ({})",
        display_value(detail, "dividendRate")?,
        display_value(detail, "dividendYield")?
    ))
}

fn earnings_dates(calendar: &Value) -> Option<String> {
    let dates: Vec<&str> = calendar
        .get("earnings")?
        .get("earningsDate")?
        .as_array()?
        .iter()
        .filter_map(|d| d.get("fmt").and_then(Value::as_str))
        .collect();
    if dates.is_empty() {
        None
    } else {
        Some(dates.join(" - "))
    }
}
