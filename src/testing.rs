//! Record builders shared by unit tests.

use crate::record::StudentRecord;
use crate::types::CellValue;

/// A record with the given score and every other metric at 75.
pub(crate) fn student(id: &str, name: &str, class: &str, score: f64) -> StudentRecord {
    full(id, name, class, [75.0, 75.0, 75.0, 75.0, score, 20.0])
}

/// A record with explicit metrics in column order:
/// comprehension, attention, focus, retention, assessment_score, engagement_time.
pub(crate) fn full(id: &str, name: &str, class: &str, metrics: [f64; 6]) -> StudentRecord {
    let [comprehension, attention, focus, retention, assessment_score, engagement_time] =
        metrics.map(|v| CellValue::Text(crate::types::format_number(v)));
    StudentRecord {
        student_id: id.to_string(),
        name: name.to_string(),
        class: class.to_string(),
        comprehension,
        attention,
        focus,
        retention,
        assessment_score,
        engagement_time,
        extra: Default::default(),
    }
}
