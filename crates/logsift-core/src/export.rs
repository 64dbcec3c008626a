//! Tabular Writer — renders records as a CSV table with priority-ordered
//! columns.
//!
//! Column order depends on the union of keys across *all* records, so the
//! table is only built once every record is known. Dictionary fields come
//! first in catalogue order, then every other key lexicographically.
//!
//! [`write_csv_file`] writes to a temporary file next to the destination and
//! renames it into place, so a failed write never leaves a half-written table
//! at the output path.

use crate::cleaner;
use crate::fields::{priority, FIELDS};
use crate::types::Record;
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to move finished table into place at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rendering options for exported tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Pass every cell through the value cleaner.
    pub clean_values: bool,
}

/// A fully rendered table: column names plus one row of cells per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records(records: &[Record]) -> Self {
        Self::from_records_with(records, ExportOptions::default())
    }

    pub fn from_records_with(records: &[Record], options: ExportOptions) -> Self {
        let columns = columns(records);
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|col| record.get(col).map_or_else(String::new, |v| render_cell(v, options)))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Ordered column list for a set of records.
pub fn columns(records: &[Record]) -> Vec<String> {
    let mut known = Vec::new();
    let mut others = BTreeSet::new();
    let mut seen_known = vec![false; FIELDS.len()];

    for key in records.iter().flat_map(Record::keys) {
        match priority(key) {
            Some(p) => seen_known[p] = true,
            None => {
                others.insert(key.clone());
            }
        }
    }
    for (p, name) in FIELDS.iter().enumerate() {
        if seen_known[p] {
            known.push((*name).to_string());
        }
    }

    known.extend(others);
    known
}

/// Render one cell. Structured values are serialised whole as JSON text.
pub fn render_cell(value: &Value, options: ExportOptions) -> String {
    if options.clean_values {
        return cleaner::clean(value);
    }
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Write records as CSV to any writer. Zero records writes nothing.
pub fn write_csv<W: Write>(
    records: &[Record],
    writer: W,
    options: ExportOptions,
) -> Result<(), ExportError> {
    let table = Table::from_records_with(records, options);
    if table.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write records as CSV to `path`, atomically replacing any existing file.
///
/// An empty record set is not an error: a warning is logged and an empty file
/// is written.
pub fn write_csv_file(
    records: &[Record],
    path: &Path,
    options: ExportOptions,
) -> Result<(), ExportError> {
    if records.is_empty() {
        warn!(path = %path.display(), "no records to save; writing empty table");
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
    write_csv(records, tmp.as_file_mut(), options)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| ExportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(
        records = records.len(),
        path = %path.display(),
        "table saved"
    );
    Ok(())
}
