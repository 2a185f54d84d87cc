//! Valuation measures in the layout of the Yahoo statistics page.
//!
//! The page's table has an unnamed first column of measure names and a second
//! column headed `As of Date: MM/DD/YYYYCurrent`. The date sits at character
//! positions 12..22 of that header, which is what the normalizer cuts out.

use super::wire::display_value;
use crate::error::ScrapeError;
use crate::table::{row, Table};
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const VALUATION_MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

/// `(row label, module, field)`; the first module holding the field wins.
const MEASURES: [(&str, &[(&str, &str)]); 9] = [
    (
        "Market Cap (intraday)",
        &[("price", "marketCap"), ("summaryDetail", "marketCap")],
    ),
    ("Enterprise Value", &[("defaultKeyStatistics", "enterpriseValue")]),
    ("Trailing P/E", &[("summaryDetail", "trailingPE")]),
    (
        "Forward P/E",
        &[("summaryDetail", "forwardPE"), ("defaultKeyStatistics", "forwardPE")],
    ),
    ("PEG Ratio (5 yr expected)", &[("defaultKeyStatistics", "pegRatio")]),
    (
        "Price/Sales (ttm)",
        &[("summaryDetail", "priceToSalesTrailing12Months")],
    ),
    ("Price/Book (mrq)", &[("defaultKeyStatistics", "priceToBook")]),
    (
        "Enterprise Value/Revenue",
        &[("defaultKeyStatistics", "enterpriseToRevenue")],
    ),
    (
        "Enterprise Value/EBITDA",
        &[("defaultKeyStatistics", "enterpriseToEbitda")],
    ),
];

/// Header of the value column for a given as-of date.
pub fn as_of_label(date: NaiveDate) -> String {
    format!("As of Date: {}Current", date.format("%m/%d/%Y"))
}

/// Build the two-column valuation table. `fallback_date` is used when the
/// response carries no market timestamp.
pub fn valuation_table(
    modules: &Map<String, Value>,
    fallback_date: NaiveDate,
) -> Result<Table, ScrapeError> {
    if !modules.contains_key("price") && !modules.contains_key("summaryDetail") {
        return Err(ScrapeError::ResponseFormat(
            "valuation response has neither price nor summaryDetail".into(),
        ));
    }

    let as_of = modules
        .get("price")
        .and_then(|p| super::wire::raw_value(p, "regularMarketTime"))
        .and_then(|ts| chrono::DateTime::from_timestamp(ts as i64, 0))
        .map(|dt| dt.date_naive())
        .unwrap_or(fallback_date);

    let rows = MEASURES
        .iter()
        .map(|(label, sources)| {
            let value = sources
                .iter()
                .find_map(|(module, field)| display_value(modules.get(*module)?, field))
                .unwrap_or_default();
            row([label.to_string(), value])
        })
        .collect();

    Table::new(row([String::new(), as_of_label(as_of)]), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_places_date_at_fixed_offset() {
        let label = as_of_label(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        assert_eq!(label, "As of Date: 05/03/2024Current");
        let token: String = label.chars().skip(12).take(10).collect();
        assert_eq!(token, "05/03/2024");
    }

    #[test]
    fn uses_market_time_and_first_available_field() {
        let m = json!({
            "price": {
                "regularMarketTime": {"raw": 1714766400, "fmt": "4:00PM EDT"},
                "marketCap": {"raw": 2.8e12, "fmt": "2.8T"}
            },
            "summaryDetail": {"trailingPE": {"raw": 29.3, "fmt": "29.30"}},
            "defaultKeyStatistics": {"forwardPE": {"raw": 27.1, "fmt": "27.10"}}
        });
        let fallback = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let t = valuation_table(m.as_object().unwrap(), fallback).unwrap();

        assert_eq!(t.columns()[0], "");
        assert_eq!(t.columns()[1], "As of Date: 05/03/2024Current");
        assert_eq!(t.num_rows(), 9);
        assert_eq!(t.rows()[0], row(["Market Cap (intraday)", "2.8T"]));
        assert_eq!(t.rows()[3], row(["Forward P/E", "27.10"]));
        assert_eq!(t.rows()[1], row(["Enterprise Value", ""]));
    }

    #[test]
    fn falls_back_to_given_date() {
        let m = json!({"summaryDetail": {}});
        let fallback = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let t = valuation_table(m.as_object().unwrap(), fallback).unwrap();
        assert_eq!(t.columns()[1], "As of Date: 10/16/2026Current");
    }
}
