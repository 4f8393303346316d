//! Search, class filter and sort for tabular display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::{Metric, StudentRecord};

use super::filter::ClassFilter;

/// Column a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Class,
    StudentId,
    Metric(Metric),
}

impl SortField {
    /// Parse a sort field from a column name.
    pub fn from_column(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "class" => Some(Self::Class),
            "student_id" => Some(Self::StudentId),
            other => Metric::from_column(other).map(Self::Metric),
        }
    }

    /// Compare two records on this field: numerically for metrics (missing -> 0), otherwise as
    /// case-insensitive strings.
    pub fn compare(self, a: &StudentRecord, b: &StudentRecord) -> Ordering {
        match self {
            Self::Metric(m) => a.value(m).total_cmp(&b.value(m)),
            Self::Name => cmp_ignore_case(&a.name, &b.name),
            Self::Class => cmp_ignore_case(&a.class, &b.class),
            Self::StudentId => cmp_ignore_case(&a.student_id, &b.student_id),
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Header-click behaviour: the same field flips direction, a new field sorts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Parameters of a table view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Case-insensitive substring of the name, or exact substring of the student id.
    pub search: String,
    pub class_filter: ClassFilter,
    pub sort: SortState,
}

/// Returns `true` if the record matches the search term.
///
/// An empty term matches everything.
pub fn matches_search(record: &StudentRecord, term: &str) -> bool {
    record.name.to_lowercase().contains(&term.to_lowercase()) || record.student_id.contains(term)
}

/// Filter and sort `records` for display.
///
/// The sort is stable: records with equal keys keep their input order in both directions. The
/// input is never modified.
pub fn view<'a, I>(records: I, query: &ViewQuery) -> Vec<&'a StudentRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut out: Vec<&StudentRecord> = records
        .into_iter()
        .filter(|r| matches_search(r, &query.search) && query.class_filter.matches(r))
        .collect();

    let SortState { field, direction } = query.sort;
    out.sort_by(|a, b| match direction {
        SortDirection::Asc => field.compare(a, b),
        SortDirection::Desc => field.compare(b, a),
    });
    out
}
