//! Record filtering.

use serde::{Deserialize, Serialize};

use crate::record::StudentRecord;

/// Sentinel accepted by [`ClassFilter::parse`] for "every class".
pub const ALL_CLASSES: &str = "all";

/// Single-field equality filter on `class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassFilter {
    /// Keep every record.
    #[default]
    All,
    /// Keep records whose class equals this label exactly (case-sensitive).
    Class(String),
}

impl ClassFilter {
    /// Parse a filter value; the literal `"all"` maps to [`ClassFilter::All`].
    pub fn parse(value: &str) -> Self {
        if value == ALL_CLASSES {
            Self::All
        } else {
            Self::Class(value.to_string())
        }
    }

    /// Returns `true` if the record passes the filter.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Class(c) => record.class == *c,
        }
    }

    /// Label used in reports: "All Classes" or "Class X".
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Classes".to_string(),
            Self::Class(c) => format!("Class {c}"),
        }
    }
}

/// Returns the records for which `predicate` returns `true`, in input order.
pub fn filter<'a, I, F>(records: I, mut predicate: F) -> Vec<&'a StudentRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
    F: FnMut(&StudentRecord) -> bool,
{
    records.into_iter().filter(|r| predicate(r)).collect()
}

/// Returns the records that pass `class_filter`, in input order.
pub fn filter_by_class<'a, I>(records: I, class_filter: &ClassFilter) -> Vec<&'a StudentRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    filter(records, |r| class_filter.matches(r))
}
