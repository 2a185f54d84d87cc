//! In-memory tabular result passed between fetch, normalize and write.
//!
//! A `Table` has ordered column headers, an optional row index (one label per
//! row, with its own header) and rows of string cells. Cells are kept as the
//! text that ends up in the CSV; no numeric schema is imposed.

use crate::error::ScrapeError;

/// Row index: a header plus one label per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIndex {
    /// Header cell written above the index column; blank when unnamed.
    pub name: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    index: Option<RowIndex>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build an unindexed table. Every row must have one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ScrapeError> {
        check_rows(&columns, &rows)?;
        Ok(Self {
            columns,
            index: None,
            rows,
        })
    }

    /// Build a table whose rows carry index labels.
    pub fn with_index(
        index: RowIndex,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, ScrapeError> {
        check_rows(&columns, &rows)?;
        if index.labels.len() != rows.len() {
            return Err(ScrapeError::malformed(
                "table",
                format!(
                    "{} index labels for {} rows",
                    index.labels.len(),
                    rows.len()
                ),
            ));
        }
        Ok(Self {
            columns,
            index: Some(index),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> Option<&RowIndex> {
        self.index.as_ref()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Replace the header at `position`.
    pub fn rename_column(
        &mut self,
        position: usize,
        name: impl Into<String>,
    ) -> Result<(), ScrapeError> {
        let slot = self.columns.get_mut(position).ok_or_else(|| {
            ScrapeError::malformed("table", format!("no column at position {position}"))
        })?;
        *slot = name.into();
        Ok(())
    }

    /// Insert a row at `position`, shifting later rows down. Index labels, if
    /// any, receive `label` (or blank).
    pub fn insert_row(
        &mut self,
        position: usize,
        row: Vec<String>,
        label: Option<String>,
    ) -> Result<(), ScrapeError> {
        if row.len() != self.columns.len() {
            return Err(ScrapeError::malformed(
                "table",
                format!("row has {} cells, expected {}", row.len(), self.columns.len()),
            ));
        }
        let position = position.min(self.rows.len());
        self.rows.insert(position, row);
        if let Some(index) = self.index.as_mut() {
            index.labels.insert(position, label.unwrap_or_default());
        }
        Ok(())
    }

    /// Swap rows and columns.
    ///
    /// The old headers become the new row index (named `index_name`). The new
    /// headers are the old index labels, or the row positions `0..n` when the
    /// table had no index.
    pub fn transpose(&self, index_name: impl Into<String>) -> Table {
        let new_columns: Vec<String> = match &self.index {
            Some(index) => index.labels.clone(),
            None => (0..self.rows.len()).map(|i| i.to_string()).collect(),
        };
        let new_rows: Vec<Vec<String>> = (0..self.columns.len())
            .map(|c| self.rows.iter().map(|row| row[c].clone()).collect())
            .collect();

        Table {
            columns: new_columns,
            index: Some(RowIndex {
                name: index_name.into(),
                labels: self.columns.clone(),
            }),
            rows: new_rows,
        }
    }

    /// Shape contract: fail unless the headers are exactly `expected`.
    pub fn expect_columns(&self, dataset: &str, expected: &[&str]) -> Result<(), ScrapeError> {
        if self.columns.len() != expected.len()
            || self.columns.iter().zip(expected).any(|(a, b)| a != b)
        {
            return Err(ScrapeError::malformed(
                dataset,
                format!("expected columns {expected:?}, got {:?}", self.columns),
            ));
        }
        Ok(())
    }

    /// Shape contract: fail unless there are exactly `n` columns.
    pub fn expect_column_count(&self, dataset: &str, n: usize) -> Result<(), ScrapeError> {
        if self.columns.len() != n {
            return Err(ScrapeError::malformed(
                dataset,
                format!("expected {n} columns, got {}", self.columns.len()),
            ));
        }
        Ok(())
    }
}

fn check_rows(columns: &[String], rows: &[Vec<String>]) -> Result<(), ScrapeError> {
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
        return Err(ScrapeError::malformed(
            "table",
            format!("row {i} has {} cells, expected {}", row.len(), columns.len()),
        ));
    }
    Ok(())
}

/// Shorthand for building string rows in fetchers and tests.
pub fn row<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cells.into_iter().map(Into::into).collect()
}
