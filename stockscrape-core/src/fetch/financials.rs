//! Financial statements, flattened.
//!
//! Upstream returns six statement groups (income, balance sheet and cash flow,
//! each yearly and quarterly), every group a list of per-period objects. They
//! are flattened into long format: one row per `(statement, period, line item)`.

use super::wire::{display_value, raw_value};
use super::FINANCIALS_COLUMNS;
use crate::error::ScrapeError;
use crate::table::{row, Table};
use serde_json::{Map, Value};

/// `(statement name, quoteSummary module, list key inside the module)`.
const STATEMENTS: [(&str, &str, &str); 6] = [
    ("yearly_income_statement", "incomeStatementHistory", "incomeStatementHistory"),
    ("yearly_balance_sheet", "balanceSheetHistory", "balanceSheetStatements"),
    ("yearly_cash_flow", "cashflowStatementHistory", "cashflowStatements"),
    ("quarterly_income_statement", "incomeStatementHistoryQuarterly", "incomeStatementHistory"),
    ("quarterly_balance_sheet", "balanceSheetHistoryQuarterly", "balanceSheetStatements"),
    ("quarterly_cash_flow", "cashflowStatementHistoryQuarterly", "cashflowStatements"),
];

/// Non-line-item keys present on every period object.
const SKIPPED_KEYS: [&str; 2] = ["maxAge", "endDate"];

/// Comma-separated module list for the quoteSummary request.
pub fn financials_modules() -> String {
    STATEMENTS
        .iter()
        .map(|(_, module, _)| *module)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn financials_table(modules: &Map<String, Value>) -> Result<Table, ScrapeError> {
    let mut rows = Vec::new();
    let mut groups_seen = 0;

    for (statement, module, list_key) in STATEMENTS {
        let Some(periods) = modules
            .get(module)
            .and_then(|m| m.get(list_key))
            .and_then(Value::as_array)
        else {
            continue;
        };
        groups_seen += 1;

        for period in periods {
            let period_ending = display_value(period, "endDate").ok_or_else(|| {
                ScrapeError::ResponseFormat(format!("{statement} period without endDate"))
            })?;
            let Some(items) = period.as_object() else {
                continue;
            };
            for key in items.keys() {
                if SKIPPED_KEYS.contains(&key.as_str()) {
                    continue;
                }
                if let Some(raw) = raw_value(period, key) {
                    rows.push(row([
                        statement.to_string(),
                        period_ending.clone(),
                        key.clone(),
                        format_amount(raw),
                    ]));
                }
            }
        }
    }

    if groups_seen == 0 {
        return Err(ScrapeError::ResponseFormat(
            "no financial statement modules in response".into(),
        ));
    }

    Table::new(row(FINANCIALS_COLUMNS), rows)
}

/// Whole amounts print without a fractional part.
fn format_amount(raw: f64) -> String {
    if raw.fract() == 0.0 && raw.abs() < 1e15 {
        format!("{raw:.0}")
    } else {
        raw.to_string()
    }
}
