//! Yahoo Finance dataset source.
//!
//! Historical series come from the v8 chart API; quotes, financial statements
//! and valuation measures come from the v10 `quoteSummary` API, which needs a
//! cookie + crumb session.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Every request is a single blocking attempt with no timeout.

use super::financials::{financials_modules, financials_table};
use super::quote::{quote_table, QUOTE_MODULES};
use super::session::Session;
use super::valuation::{valuation_table, VALUATION_MODULES};
use super::wire::{ApiError, ChartResponse, QuoteSummaryResponse};
use super::{DatasetSource, HISTORY_COLUMNS};
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::table::{row, RowIndex, Table};
use crate::ticker::Ticker;
use chrono::NaiveDate;
use reqwest::blocking::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub struct YahooSource {
    session: Session,
}

impl YahooSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            session: Session::new(config)?,
        })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        let end_ts = end
            .and_hms_opt(23, 59, 59)
            .map_or(start_ts, |dt| dt.and_utc().timestamp());
        format!(
            "{}/v8/finance/chart/{symbol}?period1={start_ts}&period2={end_ts}&interval=1d\
             &includeAdjustedClose=true",
            self.session.query_host()
        )
    }

    /// Send one request and decode the body as `T`.
    ///
    /// Yahoo answers unknown symbols with a 404 whose body still carries the
    /// JSON envelope, so the body is decoded before the status is judged.
    fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, ScrapeError> {
        let resp = request
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ScrapeError::Authentication(format!("HTTP {status} for {url}")));
        }

        let body = resp.text().map_err(|e| ScrapeError::Network(e.to_string()))?;
        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => Err(ScrapeError::ResponseFormat(format!(
                "failed to parse response from {url}: {e}"
            ))),
            Err(_) => Err(ScrapeError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    /// Fetch `quoteSummary` modules for a symbol, returning the module map.
    fn quote_summary(
        &self,
        ticker: &Ticker,
        modules: &str,
    ) -> Result<Map<String, Value>, ScrapeError> {
        let crumb = self.session.crumb()?;
        let url = format!(
            "{}/v10/finance/quoteSummary/{ticker}",
            self.session.query_host()
        );
        tracing::debug!(%ticker, modules, "requesting quoteSummary");

        let request = self
            .session
            .client()
            .get(&url)
            .query(&[("modules", modules), ("crumb", crumb.as_str())]);
        let resp: QuoteSummaryResponse = self.get_json(request, &url)?;

        let results = resp
            .quote_summary
            .result
            .ok_or_else(|| envelope_error(ticker, resp.quote_summary.error))?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::SymbolNotFound {
                symbol: ticker.to_string(),
            })
    }
}

/// Map an API error block (or its absence) onto a fetch error.
fn envelope_error(ticker: &Ticker, error: Option<ApiError>) -> ScrapeError {
    match error {
        Some(err) if err.code == "Not Found" => ScrapeError::SymbolNotFound {
            symbol: ticker.to_string(),
        },
        Some(err) => ScrapeError::ResponseFormat(format!("{}: {}", err.code, err.description)),
        None => ScrapeError::ResponseFormat("empty result with no error".into()),
    }
}

/// Parse the chart API response into a date-indexed OHLCV table.
pub fn history_table(ticker: &Ticker, resp: ChartResponse) -> Result<Table, ScrapeError> {
    let result = resp
        .chart
        .result
        .ok_or_else(|| envelope_error(ticker, resp.chart.error))?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::ResponseFormat("result array is empty".into()))?;

    // A listed symbol with no trades in range has no timestamps at all.
    let timestamps = data.timestamp.unwrap_or_default();

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::ResponseFormat("no quote data".into()))?;

    let adj_closes = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);

    let mut dates: Vec<String> = Vec::with_capacity(timestamps.len());
    let mut rows = Vec::with_capacity(timestamps.len());
    let mut last_date: Option<NaiveDate> = None;

    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| ScrapeError::ResponseFormat(format!("invalid timestamp: {ts}")))?;

        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();
        let adj_close = adj_closes
            .as_ref()
            .and_then(|v| v.get(i).copied().flatten());

        // Skip bars where all OHLCV are None (holidays/non-trading days)
        if open.is_none() && high.is_none() && low.is_none() && close.is_none() && volume.is_none()
        {
            continue;
        }

        // Yahoo repeats the live session's bar at the end of the series.
        if last_date.is_some_and(|prev| date <= prev) {
            tracing::debug!(%ticker, %date, "dropping out-of-order bar");
            continue;
        }
        last_date = Some(date);

        dates.push(date.format("%Y-%m-%d").to_string());
        rows.push(row([
            cell(open),
            cell(high),
            cell(low),
            cell(close),
            cell(adj_close),
            volume.map(|v| v.to_string()).unwrap_or_default(),
            ticker.to_string(),
        ]));
    }

    Table::with_index(
        RowIndex {
            name: "date".into(),
            labels: dates,
        },
        row(HISTORY_COLUMNS),
        rows,
    )
}

/// Missing prices are written as empty cells.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl DatasetSource for YahooSource {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_quote(&self, ticker: &Ticker) -> Result<Table, ScrapeError> {
        let modules = self.quote_summary(ticker, QUOTE_MODULES)?;
        quote_table(&modules)
    }

    fn fetch_financials(&self, ticker: &Ticker) -> Result<Table, ScrapeError> {
        let modules = self.quote_summary(ticker, &financials_modules())?;
        financials_table(&modules)
    }

    fn fetch_history(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Table, ScrapeError> {
        let url = self.chart_url(ticker.as_str(), start, end);
        tracing::debug!(%ticker, %start, %end, "requesting chart");
        let request = self.session.client().get(&url);
        let chart: ChartResponse = self.get_json(request, &url)?;
        history_table(ticker, chart)
    }

    fn fetch_stats_valuation(&self, ticker: &Ticker) -> Result<Table, ScrapeError> {
        let modules = self.quote_summary(ticker, VALUATION_MODULES)?;
        valuation_table(&modules, chrono::Local::now().date_naive())
    }
}
