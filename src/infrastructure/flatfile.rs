//! Intermediate CSV files between the extractor and the loader.
//!
//! Files carry a header of business labels followed by one row per record, in the
//! column order of their [`TableLayout`]. Column order is the whole contract.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::layout::TableLayout;

fn csv_error(table: &'static str, err: csv::Error) -> DomainError {
    let message = err.to_string();
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => DomainError::Io(e),
        _ => DomainError::InvalidRecord {
            table,
            line,
            message,
        },
    }
}

pub fn table_path(dir: &Path, layout: &TableLayout) -> PathBuf {
    dir.join(layout.file_name)
}

/// Writes `rows` under `dir`, replacing any previous file. Returns the file path.
pub fn write_table<T: Serialize>(
    dir: &Path,
    layout: &TableLayout,
    rows: &[T],
) -> Result<PathBuf, DomainError> {
    fs::create_dir_all(dir)?;
    let path = table_path(dir, layout);
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(|e| csv_error(layout.table, e))?;
    writer
        .write_record(layout.labels())
        .map_err(|e| csv_error(layout.table, e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| csv_error(layout.table, e))?;
    }
    writer.flush()?;
    Ok(path)
}

/// Reads every row of a table file into canonical warehouse rows.
///
/// The header must match the layout's labels exactly; it is then replaced by the
/// canonical names before any row is deserialized. Either the whole file reads or
/// nothing is returned.
pub fn read_table<T: DeserializeOwned>(
    dir: &Path,
    layout: &TableLayout,
) -> Result<Vec<T>, DomainError> {
    let path = table_path(dir, layout);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .map_err(|e| csv_error(layout.table, e))?;

    let header = reader
        .headers()
        .map_err(|e| csv_error(layout.table, e))?
        .clone();
    let canonical = StringRecord::from(layout.rename(header.iter())?);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(layout.table, e))?;
        let row = record
            .deserialize(Some(&canonical))
            .map_err(|e| csv_error(layout.table, e))?;
        rows.push(row);
    }
    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
