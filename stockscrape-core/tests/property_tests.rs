//! Property tests for the valuation-stats reshaping.

use proptest::prelude::*;
use stockscrape_core::normalize::{date_token, normalize_stats_valuation};
use stockscrape_core::table::row;
use stockscrape_core::{ErrorKind, Table};

proptest! {
    #[test]
    fn long_headers_yield_ten_char_token(label in "[ -~]{22,60}") {
        let token = date_token(&label).unwrap();
        prop_assert_eq!(token.chars().count(), 10);
        prop_assert_eq!(&label[12..22], token.as_str());
    }

    #[test]
    fn short_headers_are_rejected(label in "[ -~]{0,21}") {
        let table = Table::new(row(["".to_string(), label]), vec![row(["Trailing P/E", "1"])]).unwrap();
        let err = normalize_stats_valuation(table).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MalformedShape);
    }

    #[test]
    fn transpose_keeps_every_measure(
        measures in prop::collection::vec(("[A-Za-z/ ()]{1,20}", "[0-9.]{1,8}"), 1..12),
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let label = format!("As of Date: {month:02}/{day:02}/2026Current");
        let rows = measures.iter().map(|(m, v)| row([m.clone(), v.clone()])).collect();
        let table = Table::new(row(["".to_string(), label]), rows).unwrap();

        let out = normalize_stats_valuation(table).unwrap();
        let index = out.index().unwrap();
        prop_assert_eq!(&index.labels[0], "Date");
        prop_assert_eq!(index.labels[1].clone(), format!("{month:02}/{day:02}/2026"));
        prop_assert_eq!(out.num_columns(), measures.len());
        for (i, (m, v)) in measures.iter().enumerate() {
            prop_assert_eq!(&out.rows()[0][i], m);
            prop_assert_eq!(&out.rows()[1][i], v);
        }
    }
}
