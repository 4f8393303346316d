//! Recommendations derived from a snapshot, and the summary line under a table view.

use serde::{Deserialize, Serialize};

use crate::record::{Metric, StudentRecord};

use super::aggregate::AggregateSnapshot;
use super::reduce::{reduce, round_to_one_decimal, ReduceOp};

/// Co-moment sum above which attention-building work is recommended.
///
/// Compared against [`AggregateSnapshot::attention_score_co_moment`], the same unnormalised sum
/// the correlation label is classified from, so the recommendation appears exactly when the
/// label is "moderate" or "strong" positive.
pub const ATTENTION_LEVERAGE_ABOVE: f64 = 5.0;

/// Support programs are recommended once strictly more than this share of students struggle.
pub const SUPPORT_PROGRAM_SHARE: f64 = 0.2;

/// One actionable recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Recommendation {
    /// Target the skill with the lowest average.
    FocusOnSkill { skill: Metric },
    /// Attention and score move together.
    LeverageAttention,
    /// Too many students are struggling; `percent` is their share, rounded half-up.
    SupportPrograms { percent: u32 },
    /// Recognise the top performers.
    CelebrateSuccess { top_performers: usize },
}

impl Recommendation {
    pub fn title(&self) -> String {
        match self {
            Self::FocusOnSkill { skill } => format!("Focus on {}", skill.label()),
            Self::LeverageAttention => "Leverage Attention-Performance Connection".to_string(),
            Self::SupportPrograms { .. } => "Implement Support Programs".to_string(),
            Self::CelebrateSuccess { .. } => "Celebrate Success".to_string(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::FocusOnSkill { .. } => "This skill shows the lowest average performance. Consider \
                implementing targeted exercises and additional practice sessions."
                .to_string(),
            Self::LeverageAttention => "Strong correlation between attention and performance suggests \
                that attention-building activities could significantly improve overall scores."
                .to_string(),
            Self::SupportPrograms { percent } => format!(
                "{percent}% of students need additional support. Consider peer tutoring or small \
                 group interventions."
            ),
            Self::CelebrateSuccess { top_performers } => format!(
                "Recognize the {top_performers} top performers and use them as peer mentors to help \
                 struggling students."
            ),
        }
    }
}

/// Recommendations for a snapshot, in display order.
///
/// The skill focus and the celebration are always present; the other two depend on the data.
pub fn recommendations(snapshot: &AggregateSnapshot) -> Vec<Recommendation> {
    let mut out = vec![Recommendation::FocusOnSkill {
        skill: snapshot.weakest_skill.skill,
    }];

    if snapshot.attention_score_co_moment > ATTENTION_LEVERAGE_ABOVE {
        out.push(Recommendation::LeverageAttention);
    }

    let struggling = snapshot.struggling_students.len();
    let total = snapshot.total_students;
    if struggling as f64 > total as f64 * SUPPORT_PROGRAM_SHARE {
        let percent = (struggling as f64 / total as f64 * 100.0 + 0.5).floor() as u32;
        out.push(Recommendation::SupportPrograms { percent });
    }

    out.push(Recommendation::CelebrateSuccess {
        top_performers: snapshot.top_performers.len(),
    });
    out
}

/// Score summary of the rows currently shown in a table view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub rows: usize,
    /// Mean score rounded to one decimal.
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
}

/// Summarise the rows returned by [`super::view()`]. An empty view summarises to zeros.
pub fn summarize_view(rows: &[&StudentRecord]) -> ViewSummary {
    ViewSummary {
        rows: rows.len(),
        average_score: round_to_one_decimal(reduce(rows, Metric::AssessmentScore, ReduceOp::Mean)),
        highest_score: reduce(rows, Metric::AssessmentScore, ReduceOp::Max),
        lowest_score: reduce(rows, Metric::AssessmentScore, ReduceOp::Min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{aggregate, view, ClassFilter, ViewQuery};
    use crate::testing::{full, student};

    /// `n` records of which the first `struggling` score 50, the rest 75.
    fn cohort(n: usize, struggling: usize) -> Vec<StudentRecord> {
        (0..n)
            .map(|i| {
                let score = if i < struggling { 50.0 } else { 75.0 };
                student(&i.to_string(), &format!("S{i}"), "X", score)
            })
            .collect()
    }

    fn support(recs: &[Recommendation]) -> Option<u32> {
        recs.iter().find_map(|r| match r {
            Recommendation::SupportPrograms { percent } => Some(*percent),
            _ => None,
        })
    }

    #[test]
    fn support_programs_need_strictly_more_than_a_fifth() {
        let exactly = aggregate(&cohort(10, 2), &ClassFilter::All);
        assert_eq!(support(&recommendations(&exactly)), None);

        let above = aggregate(&cohort(10, 3), &ClassFilter::All);
        assert_eq!(support(&recommendations(&above)), Some(30));

        let thirds = aggregate(&cohort(3, 1), &ClassFilter::All);
        assert_eq!(support(&recommendations(&thirds)), Some(33));
    }

    #[test]
    fn focus_and_celebration_are_always_present() {
        let records = vec![
            full("1", "A", "X", [95.0, 90.0, 90.0, 60.0, 92.0, 30.0]),
            full("2", "B", "X", [85.0, 85.0, 88.0, 65.0, 88.0, 25.0]),
        ];
        let snap = aggregate(&records, &ClassFilter::All);
        let recs = recommendations(&snap);

        assert_eq!(recs.first(), Some(&Recommendation::FocusOnSkill { skill: Metric::Retention }));
        assert_eq!(recs.last(), Some(&Recommendation::CelebrateSuccess { top_performers: 2 }));
        assert_eq!(recs[0].title(), "Focus on Retention");
        assert!(recs.last().unwrap().message().starts_with("Recognize the 2 top performers"));

        let empty = aggregate(&records, &ClassFilter::parse("nope"));
        assert_eq!(
            recommendations(&empty),
            vec![
                Recommendation::FocusOnSkill { skill: Metric::Comprehension },
                Recommendation::CelebrateSuccess { top_performers: 0 },
            ]
        );
    }

    #[test]
    fn attention_leverage_follows_the_co_moment_sum() {
        // co-moment sum 900 -> strong positive
        let linked = vec![
            full("1", "A", "X", [90.0, 85.0, 85.0, 90.0, 95.0, 30.0]),
            full("2", "B", "X", [50.0, 40.0, 40.0, 50.0, 55.0, 10.0]),
        ];
        let snap = aggregate(&linked, &ClassFilter::All);
        assert!(recommendations(&snap).contains(&Recommendation::LeverageAttention));

        // co-moment sum exactly 5 -> weak, no recommendation
        let flat = vec![
            full("1", "A", "X", [70.0, 71.0, 70.0, 70.0, 75.0, 20.0]),
            full("2", "B", "X", [70.0, 70.0, 70.0, 70.0, 65.0, 20.0]),
        ];
        let snap = aggregate(&flat, &ClassFilter::All);
        assert_eq!(snap.attention_score_co_moment, 5.0);
        assert!(!recommendations(&snap).contains(&Recommendation::LeverageAttention));
    }

    #[test]
    fn view_summary_covers_the_searched_rows() {
        let records = vec![
            student("1", "Ada", "X", 91.0),
            student("2", "Adam", "X", 80.0),
            student("3", "Ben", "X", 60.0),
            student("4", "Adele", "Y", 99.0),
        ];
        let query = ViewQuery {
            search: "ad".to_string(),
            class_filter: ClassFilter::parse("X"),
            ..Default::default()
        };
        let summary = summarize_view(&view(&records, &query));
        assert_eq!(
            summary,
            ViewSummary {
                rows: 2,
                average_score: 85.5,
                highest_score: 91.0,
                lowest_score: 80.0,
            }
        );
    }

    #[test]
    fn empty_view_summarises_to_zero() {
        assert_eq!(summarize_view(&[]), ViewSummary::default());
    }
}
