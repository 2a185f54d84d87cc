//! End-to-end pipeline tests against an in-memory dataset source.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::time::Duration;
use stockscrape_core::fetch::{FINANCIALS_COLUMNS, HISTORY_COLUMNS, QUOTE_COLUMNS};
use stockscrape_core::table::row;
use stockscrape_core::{
    DatasetCategory, DatasetSource, ErrorKind, RowIndex, RunReporter, RunSummary, ScrapeConfig,
    ScrapeError, Scraper, Table, Ticker,
};

/// Serves canned tables; `UNKNOWN` is rejected like a delisted symbol.
struct FixtureSource {
    history_days: Cell<usize>,
    stats_label: String,
    history_calls: RefCell<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl FixtureSource {
    fn new() -> Self {
        Self {
            history_days: Cell::new(5),
            stats_label: "As of Date: 10/16/2026Current".into(),
            history_calls: RefCell::new(Vec::new()),
        }
    }

    fn check(ticker: &Ticker) -> Result<(), ScrapeError> {
        if ticker.as_str() == "UNKNOWN" {
            return Err(ScrapeError::SymbolNotFound {
                symbol: ticker.to_string(),
            });
        }
        Ok(())
    }
}

impl DatasetSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch_quote(&self, ticker: &Ticker) -> Result<Table, ScrapeError> {
        Self::check(ticker)?;
        Table::new(
            row(QUOTE_COLUMNS),
            vec![
                row(["Market Cap", "2.9T"]),
                row(["Open", "188.50"]),
                row(["Volume", "51.23M"]),
            ],
        )
    }

    fn fetch_financials(&self, ticker: &Ticker) -> Result<Table, ScrapeError> {
        Self::check(ticker)?;
        Table::new(
            row(FINANCIALS_COLUMNS),
            vec![
                row(["yearly_income_statement", "2023-09-30", "totalRevenue", "383285000000"]),
                row(["quarterly_cash_flow", "2024-03-30", "dividendsPaid", "-3710000000"]),
            ],
        )
    }

    fn fetch_history(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Table, ScrapeError> {
        Self::check(ticker)?;
        self.history_calls
            .borrow_mut()
            .push((ticker.to_string(), start, end));

        let first = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let days = self.history_days.get();
        let labels = (0..days)
            .map(|i| (first + chrono::Duration::days(i as i64)).to_string())
            .collect();
        let rows = (0..days)
            .map(|i| {
                let px = format!("{}", 470 + i);
                row([
                    px.clone(),
                    px.clone(),
                    px.clone(),
                    px.clone(),
                    px,
                    "1000".to_string(),
                    ticker.to_string(),
                ])
            })
            .collect();
        Table::with_index(
            RowIndex {
                name: "date".into(),
                labels,
            },
            row(HISTORY_COLUMNS),
            rows,
        )
    }

    fn fetch_stats_valuation(&self, ticker: &Ticker) -> Result<Table, ScrapeError> {
        Self::check(ticker)?;
        Table::new(
            row([String::new(), self.stats_label.clone()]),
            vec![
                row(["Market Cap (intraday)", "2.8T"]),
                row(["Trailing P/E", "29.30"]),
                row(["Price/Book (mrq)", "45.10"]),
            ],
        )
    }
}

#[derive(Default)]
struct RecordingReporter {
    completed: RefCell<Vec<(RunSummary, String)>>,
    batches: RefCell<Vec<(DatasetCategory, usize)>>,
}

impl RunReporter for RecordingReporter {
    fn on_complete(&self, summary: &RunSummary, artifact: &Path) {
        self.completed
            .borrow_mut()
            .push((summary.clone(), artifact.display().to_string()));
    }

    fn on_batch_complete(&self, category: DatasetCategory, tickers: usize, _elapsed: Duration) {
        self.batches.borrow_mut().push((category, tickers));
    }
}

fn config_in(dir: &Path) -> ScrapeConfig {
    ScrapeConfig {
        data_root: dir.join("data/stock_info"),
        ..ScrapeConfig::default()
    }
}

fn ticker(s: &str) -> Ticker {
    Ticker::new(s).unwrap()
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let records = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, records)
}

#[test]
fn current_quote_starts_with_timestamp_within_run_bounds() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let reporter = RecordingReporter::default();

    let before = Local::now().naive_local().with_nanosecond(0).unwrap();
    let summary = scraper
        .scrape(&ticker("AAPL"), DatasetCategory::CurrentQuote, &reporter)
        .unwrap();
    let after = Local::now().naive_local();

    let path = tmp.path().join("data/stock_info/AAPL/AAPL_cur.csv");
    let (headers, records) = read_csv(&path);
    assert_eq!(headers, vec!["attribute", "value"]);
    assert_eq!(records.len(), 4);
    assert_eq!(records[0][0], "Timestamp");
    assert_eq!(records[1][0], "Market Cap");

    let stamp = NaiveDateTime::parse_from_str(&records[0][1], "%m-%d-%Y, %H:%M:%S").unwrap();
    assert!(before <= stamp && stamp <= after, "{stamp} not in [{before}, {after}]");

    assert_eq!(summary.rows, 4);
    let completed = reporter.completed.borrow();
    assert_eq!(completed.len(), 1);
    assert!(completed[0].1.ends_with("AAPL_cur.csv"));
}

#[test]
fn financials_are_written_without_index() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));

    scraper
        .scrape(&ticker("AAPL"), DatasetCategory::Financials, &RecordingReporter::default())
        .unwrap();

    let (headers, records) = read_csv(&tmp.path().join("data/stock_info/AAPL/AAPL_finance.csv"));
    assert_eq!(headers, FINANCIALS_COLUMNS.to_vec());
    assert_eq!(records.len(), 2);
    assert_eq!(records[1][3], "-3710000000");
}

#[test]
fn history_has_increasing_dates_and_full_window() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let reporter = RecordingReporter::default();

    let summaries = scraper
        .scrape_history(&[ticker("SPY"), ticker("QQQ")], &reporter)
        .unwrap();
    assert_eq!(summaries.len(), 2);

    for sym in ["SPY", "QQQ"] {
        let path = tmp
            .path()
            .join(format!("data/stock_info/{sym}/{sym}_hist.csv"));
        let (headers, records) = read_csv(&path);
        assert_eq!(headers[0], "date");
        assert_eq!(&headers[1..], &HISTORY_COLUMNS[..]);
        assert_eq!(records.len(), 5);

        let dates: Vec<NaiveDate> = records
            .iter()
            .map(|r| NaiveDate::parse_from_str(&r[0], "%Y-%m-%d").unwrap())
            .collect();
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(records.iter().all(|r| r[7] == sym));
    }

    let calls = source.history_calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    assert_eq!(calls[0].2, Local::now().date_naive());

    assert_eq!(
        *reporter.batches.borrow(),
        vec![(DatasetCategory::HistoricalSeries, 2)]
    );
    assert!(reporter.completed.borrow().is_empty());
}

#[test]
fn stats_valuation_index_holds_date_headers() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));

    scraper
        .scrape(&ticker("MSFT"), DatasetCategory::ValuationStats, &RecordingReporter::default())
        .unwrap();

    let path = tmp.path().join("data/stock_info/MSFT/MSFT_stats_val.csv");
    let (headers, records) = read_csv(&path);
    assert_eq!(headers, vec!["", "0", "1", "2"]);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0][0], "Date");
    assert_eq!(records[1][0], "10/16/2026");
    assert_eq!(records[1][0].chars().count(), 10);
    assert_eq!(records[0][1], "Market Cap (intraday)");
    assert_eq!(records[1][3], "45.10");
}

#[test]
fn rerun_overwrites_previous_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let reporter = RecordingReporter::default();
    let path = tmp.path().join("data/stock_info/SPY/SPY_hist.csv");

    scraper.scrape_history(&[ticker("SPY")], &reporter).unwrap();
    assert_eq!(read_csv(&path).1.len(), 5);

    source.history_days.set(3);
    scraper.scrape_history(&[ticker("SPY")], &reporter).unwrap();
    assert_eq!(read_csv(&path).1.len(), 3);
}

#[test]
fn empty_ticker_list_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let reporter = RecordingReporter::default();

    let summaries = scraper.scrape_history(&[], &reporter).unwrap();
    assert!(summaries.is_empty());
    assert!(!tmp.path().join("data").exists());
    assert_eq!(
        *reporter.batches.borrow(),
        vec![(DatasetCategory::HistoricalSeries, 0)]
    );
}

#[test]
fn rejected_ticker_leaves_no_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let reporter = RecordingReporter::default();
    let bad = ticker("UNKNOWN");

    for category in DatasetCategory::ALL {
        let result = if category == DatasetCategory::HistoricalSeries {
            scraper.scrape_history(&[bad.clone()], &reporter).map(|_| ())
        } else {
            scraper.scrape(&bad, category, &reporter).map(|_| ())
        };
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteFetch);
        assert!(!scraper.store().artifact_path(&bad, category).exists());
    }

    assert!(reporter.completed.borrow().is_empty());
    assert!(reporter.batches.borrow().is_empty());
}

#[test]
fn failed_fetch_keeps_prior_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let bad = ticker("UNKNOWN");

    let dir = scraper.store().ensure_dir(&bad).unwrap();
    let path = dir.join("UNKNOWN_cur.csv");
    std::fs::write(&path, "attribute,value\nOpen,1\n").unwrap();

    let err = scraper
        .scrape(&bad, DatasetCategory::CurrentQuote, &RecordingReporter::default())
        .unwrap_err();
    assert!(matches!(err, ScrapeError::SymbolNotFound { .. }));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "attribute,value\nOpen,1\n"
    );
}

#[test]
fn batch_stops_at_first_rejected_ticker() {
    let tmp = tempfile::tempdir().unwrap();
    let source = FixtureSource::new();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));
    let reporter = RecordingReporter::default();

    let tickers = [ticker("SPY"), ticker("UNKNOWN"), ticker("QQQ")];
    assert!(scraper.scrape_history(&tickers, &reporter).is_err());

    assert!(tmp.path().join("data/stock_info/SPY/SPY_hist.csv").exists());
    assert!(!tmp.path().join("data/stock_info/QQQ").exists());
    assert!(reporter.batches.borrow().is_empty());
}

#[test]
fn malformed_stats_label_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut source = FixtureSource::new();
    source.stats_label = "Current".into();
    let scraper = Scraper::new(&source, &config_in(tmp.path()));

    let err = scraper
        .scrape(&ticker("MSFT"), DatasetCategory::ValuationStats, &RecordingReporter::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedShape);
    assert!(!tmp
        .path()
        .join("data/stock_info/MSFT/MSFT_stats_val.csv")
        .exists());
}
