//! CSV serialization of normalized tables.
//!
//! Writes are atomic: the table is written to `{name}.csv.tmp` in the target
//! directory, then renamed over the artifact. A failed write leaves any
//! previous artifact untouched.

use crate::error::ScrapeError;
use crate::table::Table;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `table` to `path`, overwriting any existing file.
///
/// With `include_index`, the row index is written as the leading column under
/// its name; an unindexed table gets its row positions instead.
pub fn write_table(table: &Table, path: &Path, include_index: bool) -> Result<(), ScrapeError> {
    let tmp_path = tmp_path_for(path);

    if let Err(e) = write_records(table, &tmp_path, include_index) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        ScrapeError::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), rows = table.num_rows(), "wrote csv");
    Ok(())
}

fn write_records(table: &Table, tmp_path: &Path, include_index: bool) -> Result<(), ScrapeError> {
    let csv_err = |source: csv::Error| ScrapeError::Csv {
        path: tmp_path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(tmp_path).map_err(csv_err)?;

    let index = table.index();
    if include_index {
        let name = index.map(|i| i.name.as_str()).unwrap_or("");
        let header = std::iter::once(name).chain(table.columns().iter().map(String::as_str));
        writer.write_record(header).map_err(csv_err)?;
    } else {
        writer.write_record(table.columns()).map_err(csv_err)?;
    }

    for (i, cells) in table.rows().iter().enumerate() {
        if include_index {
            let label = match index {
                Some(index) => index.labels[i].clone(),
                None => i.to_string(),
            };
            let record = std::iter::once(label.as_str()).chain(cells.iter().map(String::as_str));
            writer.write_record(record).map_err(csv_err)?;
        } else {
            writer.write_record(cells).map_err(csv_err)?;
        }
    }

    writer.flush().map_err(|source| ScrapeError::WriteFile {
        path: tmp_path.to_path_buf(),
        source,
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
