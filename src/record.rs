//! Typed student records.
//!
//! A [`StudentRecord`] is built from a validated [`RawRow`]. Numeric fields keep their raw cell so
//! reports can show the value as it was supplied; arithmetic always goes through
//! [`coerce_numeric_or_zero`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{CellValue, RawRow};

/// The nine columns every input file must provide, in the order missing columns are reported.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "student_id",
    "name",
    "class",
    "comprehension",
    "attention",
    "focus",
    "retention",
    "assessment_score",
    "engagement_time",
];

/// Numeric per-student measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Comprehension,
    Attention,
    Focus,
    Retention,
    AssessmentScore,
    EngagementTime,
}

impl Metric {
    /// Every metric, in column order.
    pub const ALL: [Metric; 6] = [
        Metric::Comprehension,
        Metric::Attention,
        Metric::Focus,
        Metric::Retention,
        Metric::AssessmentScore,
        Metric::EngagementTime,
    ];

    /// The cognitive skills, in the fixed order used to break ties (first wins).
    pub const SKILLS: [Metric; 4] = [
        Metric::Comprehension,
        Metric::Attention,
        Metric::Focus,
        Metric::Retention,
    ];

    /// Column name in the input file.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Comprehension => "comprehension",
            Metric::Attention => "attention",
            Metric::Focus => "focus",
            Metric::Retention => "retention",
            Metric::AssessmentScore => "assessment_score",
            Metric::EngagementTime => "engagement_time",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Comprehension => "Comprehension",
            Metric::Attention => "Attention",
            Metric::Focus => "Focus",
            Metric::Retention => "Retention",
            Metric::AssessmentScore => "Assessment Score",
            Metric::EngagementTime => "Engagement Time",
        }
    }

    /// Parse a metric from its column name.
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == name)
    }
}

/// Reads a cell as a number; absent or unparsable values become `0.0`.
///
/// This is the single place where the zero-default policy lives: a missing value contributes 0 to
/// every sum it touches and still counts towards the denominator of an average.
pub fn coerce_numeric_or_zero(cell: Option<&CellValue>) -> f64 {
    cell.and_then(parse_numeric).unwrap_or(0.0)
}

/// Parses a cell as a finite number.
///
/// Text uses float-prefix semantics: leading whitespace is skipped and the longest numeric
/// prefix is taken (`"85abc"` -> 85, `"1e2x"` -> 100). Returns `None` when no digits are found.
pub fn parse_numeric(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(v) if v.is_finite() => Some(*v),
        CellValue::Text(s) => parse_float_prefix(s),
        _ => None,
    }
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One row of student performance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub class: String,
    pub comprehension: CellValue,
    pub attention: CellValue,
    pub focus: CellValue,
    pub retention: CellValue,
    pub assessment_score: CellValue,
    pub engagement_time: CellValue,
    /// Every non-required column of the source row, in header order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, CellValue>,
}

impl StudentRecord {
    /// Build a record from a raw row. Absent required fields become empty values.
    pub fn from_raw(row: RawRow) -> Self {
        let mut fields = row.into_fields();
        let mut take = |key: &str| fields.shift_remove(key).unwrap_or(CellValue::Empty);

        let student_id = take("student_id").display();
        let name = take("name").display();
        let class = take("class").display();
        let comprehension = take("comprehension");
        let attention = take("attention");
        let focus = take("focus");
        let retention = take("retention");
        let assessment_score = take("assessment_score");
        let engagement_time = take("engagement_time");

        Self {
            student_id,
            name,
            class,
            comprehension,
            attention,
            focus,
            retention,
            assessment_score,
            engagement_time,
            extra: fields,
        }
    }

    /// Raw cell for a metric.
    pub fn raw(&self, metric: Metric) -> &CellValue {
        match metric {
            Metric::Comprehension => &self.comprehension,
            Metric::Attention => &self.attention,
            Metric::Focus => &self.focus,
            Metric::Retention => &self.retention,
            Metric::AssessmentScore => &self.assessment_score,
            Metric::EngagementTime => &self.engagement_time,
        }
    }

    /// Numeric value of a metric, missing/unparsable -> 0.
    pub fn value(&self, metric: Metric) -> f64 {
        coerce_numeric_or_zero(Some(self.raw(metric)))
    }

    /// Shorthand for the assessment score.
    pub fn score(&self) -> f64 {
        self.value(Metric::AssessmentScore)
    }
}

/// The full, ordered set of records loaded for a session.
///
/// Replaced wholesale on every upload and never mutated in place; filters and sorts produce
/// derived views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<StudentRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<StudentRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = StudentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
