//! Raw (pre-validation) data model.
//!
//! Parsers produce an ordered sequence of [`RawRow`]s: loosely-typed mappings from header name to
//! [`CellValue`], preserving the header order of the source file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single loosely-typed cell value as read from a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing/empty cell.
    Empty,
    /// Numeric cell (spreadsheet numbers; CSV values are always text).
    Number(f64),
    /// Boolean cell (spreadsheets only).
    Bool(bool),
    /// Text cell.
    Text(String),
}

impl CellValue {
    /// Build a text cell, mapping an empty string to [`CellValue::Empty`].
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }

    /// Returns `true` for empty cells and blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display form of the value (empty string for [`CellValue::Empty`]).
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(v) => format_number(*v),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// Formats a number for display with `f64`'s `Display`: integral values have no fractional part
/// and large magnitudes are written out in full, never in exponent form. Negative zero prints
/// as `0`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    v.to_string()
}

/// One parsed row: header name -> raw cell, in header order.
///
/// Duplicate header names keep the position of their first occurrence and the value of the last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: IndexMap<String, CellValue>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) a field.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        self.fields.insert(key.into(), value);
    }

    /// Look up a field by header name.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    /// Returns `true` if the row has a field with this header name.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Header names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the row into its ordered field map.
    pub fn into_fields(self) -> IndexMap<String, CellValue> {
        self.fields
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}
