//! Wire types for the Yahoo Finance JSON APIs.
//!
//! The v8 chart API is strongly typed. `quoteSummary` modules are sparse and
//! change shape between symbols, so they are kept as `serde_json::Value` and
//! read through [`display_value`] and [`raw_value`].

use serde::Deserialize;
use serde_json::{Map, Value};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartResult,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteData>,
    pub adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjCloseData {
    pub adjclose: Vec<Option<f64>>,
}

/// Error block shared by the chart and quoteSummary envelopes.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub description: String,
}

/// Yahoo Finance v10 quoteSummary response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryResult {
    pub result: Option<Vec<Map<String, Value>>>,
    pub error: Option<ApiError>,
}

/// Display text of a field: the `fmt` (or `longFmt`) of a `{raw, fmt}` object,
/// or the value itself when it is a bare string or number.
pub fn display_value(module: &Value, key: &str) -> Option<String> {
    match module.get(key)? {
        Value::Object(obj) => obj
            .get("fmt")
            .or_else(|| obj.get("longFmt"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Raw numeric value of a field, from a `{raw, fmt}` object or a bare number.
pub fn raw_value(module: &Value, key: &str) -> Option<f64> {
    match module.get(key)? {
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
