use std::path::Path;

use log::warn;

use super::model::MapRecord;
use crate::error::MapParseError;

/// Column names a map CSV must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 3] = ["RPM", "Load", "Timing"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a map CSV into coerced records: read the table, then parse the three
/// required fields of every row, dropping rows with unparseable cells.
pub fn load_map_csv(path: &Path) -> Result<Vec<MapRecord>, MapParseError> {
    let table = read_table(path)?;
    coerce_rows(&table)
}

// ---------------------------------------------------------------------------
// Record loader
// ---------------------------------------------------------------------------

/// The raw table as read from disk: data rows plus the positions of the
/// three required columns within each row.
pub struct RawTable {
    rows: Vec<csv::StringRecord>,
    /// Indices of RPM, Load, Timing in row order.
    required_idx: [usize; 3],
}

/// Read a delimited table with a header row and verify the required columns.
///
/// Ragged data rows are a structural CSV failure and abort the load; they are
/// never silently skipped.
pub fn read_table(path: &Path) -> Result<RawTable, MapParseError> {
    if !path.exists() {
        return Err(MapParseError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if std::fs::metadata(path)?.len() == 0 {
        return Err(MapParseError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut required_idx = [0usize; 3];
    let mut missing = Vec::new();
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == name) {
            Some(i) => required_idx[slot] = i,
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(MapParseError::MissingColumns {
            missing,
            found: headers,
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }
    if rows.is_empty() {
        return Err(MapParseError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    Ok(RawTable { rows, required_idx })
}

// ---------------------------------------------------------------------------
// Field coercer
// ---------------------------------------------------------------------------

/// Parse one CSV cell as a finite number. Empty cells, text, and non-finite
/// literals (`NaN`, `inf`) are all missing rather than errors.
fn parse_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce every row's required fields, keeping only rows where all three
/// parsed. Fails only when nothing valid remains.
pub fn coerce_rows(table: &RawTable) -> Result<Vec<MapRecord>, MapParseError> {
    let [rpm_idx, load_idx, timing_idx] = table.required_idx;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut dropped = 0usize;

    for row in &table.rows {
        let rpm = parse_cell(row.get(rpm_idx).unwrap_or(""));
        let load = parse_cell(row.get(load_idx).unwrap_or(""));
        let timing = parse_cell(row.get(timing_idx).unwrap_or(""));

        match (rpm, load, timing) {
            (Some(rpm), Some(load), Some(timing)) => {
                records.push(MapRecord { rpm, load, timing })
            }
            _ => dropped += 1,
        }
    }

    if records.is_empty() {
        return Err(MapParseError::NoValidData);
    }
    if dropped > 0 {
        warn!(
            "dropped {dropped} of {} rows with non-numeric required cells",
            table.rows.len()
        );
    }

    Ok(records)
}
