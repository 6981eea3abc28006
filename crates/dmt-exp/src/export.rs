use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use dmt_core::errors::{DmtError, ErrorInfo};
use serde::Serialize;

fn io_error(code: &str, path: &Path, err: impl ToString) -> DmtError {
    DmtError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display()),
    )
}

fn ensure_parent(path: &Path) -> Result<(), DmtError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| io_error("artefact_dir", path, err))?;
        }
    }
    Ok(())
}

/// Writes `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DmtError> {
    ensure_parent(path)?;
    let mut bytes =
        serde_json::to_vec_pretty(value).map_err(|err| io_error("json_serialize", path, err))?;
    bytes.push(b'\n');
    fs::write(path, bytes).map_err(|err| io_error("json_write", path, err))
}

/// Writes serializable records as a CSV table with a header row.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DmtError> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| io_error("csv_open", path, err))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| io_error("csv_write_row", path, err))?;
    }
    writer.flush().map_err(|err| io_error("csv_flush", path, err))
}
