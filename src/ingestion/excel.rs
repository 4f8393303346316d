#![cfg(feature = "excel")]

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::{DashboardError, DashboardResult};
use crate::types::{CellValue, RawRow};

/// Parse a spreadsheet (`.xlsx`, `.xls`, `.ods`, etc.) held in memory into raw rows.
///
/// Behavior:
/// - Reads the first sheet of the workbook only
/// - Detects the first non-empty row as the header row; every header cell becomes a key
/// - Skips fully empty data rows
/// - Keeps numeric cells numeric; empty cells become [`CellValue::Empty`]
pub fn parse_spreadsheet_bytes(bytes: &[u8]) -> DashboardResult<Vec<RawRow>> {
    if bytes.is_empty() {
        return Err(DashboardError::empty_file());
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(DashboardError::empty_file());
    };
    rows_from_range(&range?)
}

/// Parse a spreadsheet file into raw rows (first sheet only).
pub fn parse_spreadsheet_from_path(path: impl AsRef<Path>) -> DashboardResult<Vec<RawRow>> {
    let bytes = std::fs::read(path)?;
    parse_spreadsheet_bytes(&bytes)
}

fn rows_from_range(range: &Range<Data>) -> DashboardResult<Vec<RawRow>> {
    let mut rows_iter = range
        .rows()
        .filter(|row| row.iter().any(|c| !is_empty_cell(c)));

    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(DashboardError::empty_file)?
        .iter()
        .map(|c| cell_to_header_string(c).trim().to_string())
        .collect();

    let rows = rows_iter
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(idx, name)| {
                    let cell = row.get(idx).unwrap_or(&Data::Empty);
                    (name.clone(), convert_cell(cell))
                })
                .collect()
        })
        .collect();

    Ok(rows)
}

fn is_empty_cell(c: &Data) -> bool {
    match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => crate::types::format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn convert_cell(c: &Data) -> CellValue {
    match c {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::text(s.trim()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Error(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_spreadsheet_bytes;
    use crate::error::DashboardError;

    #[test]
    fn empty_buffer_is_rejected_before_opening() {
        let err = parse_spreadsheet_bytes(&[]).unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn garbage_bytes_surface_as_workbook_error() {
        let err = parse_spreadsheet_bytes(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, DashboardError::Excel(_)));
    }
}
