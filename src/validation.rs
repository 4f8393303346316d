//! Required-column validation.
//!
//! Only the first row's key set is checked. Types, ranges and per-row completeness are not:
//! incomplete rows are accepted and their blank values read as zero through
//! [`crate::record::coerce_numeric_or_zero`].

use crate::error::{DashboardError, DashboardResult};
use crate::record::{RecordSet, StudentRecord, REQUIRED_FIELDS};
use crate::types::RawRow;

/// Returns every required column absent from `row`, in required-column order.
pub fn missing_fields(row: &RawRow) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|f| !row.contains_key(f))
        .map(|f| f.to_string())
        .collect()
}

/// Verify that the first row carries every required column.
///
/// Returns the rows unchanged on success. An empty sequence is rejected as an empty file.
pub fn validate(rows: Vec<RawRow>) -> DashboardResult<Vec<RawRow>> {
    let first = rows.first().ok_or_else(DashboardError::empty_file)?;
    let missing = missing_fields(first);
    if !missing.is_empty() {
        return Err(DashboardError::Validation { missing });
    }
    Ok(rows)
}

/// Convert validated rows into the session's record set.
pub fn into_record_set(rows: Vec<RawRow>) -> RecordSet {
    rows.into_iter().map(StudentRecord::from_raw).collect()
}
