//! Summary statistics over a (class-filtered) record set.
//!
//! [`aggregate`] is a pure function of its inputs: the snapshot has no identity of its own and is
//! recomputed from scratch whenever the records or the class filter change.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::{Metric, StudentRecord};

use super::filter::{filter_by_class, ClassFilter};
use super::reduce::{co_moment_sum, reduce, round_to_one_decimal, ReduceOp};

/// Score at or above which a record is "excellent".
pub const EXCELLENT_MIN: f64 = 90.0;
/// Score at or above which a record is "good".
pub const GOOD_MIN: f64 = 80.0;
/// Score at or above which a record is "average".
pub const AVERAGE_MIN: f64 = 70.0;
/// Score at or above which a record is "below average"; anything lower needs improvement.
pub const BELOW_AVERAGE_MIN: f64 = 60.0;

/// Struggling: score below this, or attention/focus below [`STRUGGLING_SKILL_BELOW`].
pub const STRUGGLING_SCORE_BELOW: f64 = 70.0;
pub const STRUGGLING_SKILL_BELOW: f64 = 60.0;
/// Top performer: score at least this, and attention/focus at least [`TOP_SKILL_MIN`].
pub const TOP_SCORE_MIN: f64 = 85.0;
pub const TOP_SKILL_MIN: f64 = 80.0;

/// Ranking label for records with a blank class.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Performance band of a single assessment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Average,
    BelowAverage,
    NeedsImprovement,
}

impl PerformanceBand {
    /// Bands from best to worst.
    pub const ALL: [PerformanceBand; 5] = [
        PerformanceBand::Excellent,
        PerformanceBand::Good,
        PerformanceBand::Average,
        PerformanceBand::BelowAverage,
        PerformanceBand::NeedsImprovement,
    ];

    /// Classify a score; thresholds are tested in descending order and the first match wins.
    pub fn for_score(score: f64) -> Self {
        if score >= EXCELLENT_MIN {
            Self::Excellent
        } else if score >= GOOD_MIN {
            Self::Good
        } else if score >= AVERAGE_MIN {
            Self::Average
        } else if score >= BELOW_AVERAGE_MIN {
            Self::BelowAverage
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent (90+)",
            Self::Good => "Good (80-89)",
            Self::Average => "Average (70-79)",
            Self::BelowAverage => "Below Avg (60-69)",
            Self::NeedsImprovement => "Needs Help (<60)",
        }
    }
}

/// Bucket counts of the five performance bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub below_average: usize,
    pub needs_improvement: usize,
}

impl PerformanceDistribution {
    fn add(&mut self, band: PerformanceBand) {
        match band {
            PerformanceBand::Excellent => self.excellent += 1,
            PerformanceBand::Good => self.good += 1,
            PerformanceBand::Average => self.average += 1,
            PerformanceBand::BelowAverage => self.below_average += 1,
            PerformanceBand::NeedsImprovement => self.needs_improvement += 1,
        }
    }

    pub fn count(&self, band: PerformanceBand) -> usize {
        match band {
            PerformanceBand::Excellent => self.excellent,
            PerformanceBand::Good => self.good,
            PerformanceBand::Average => self.average,
            PerformanceBand::BelowAverage => self.below_average,
            PerformanceBand::NeedsImprovement => self.needs_improvement,
        }
    }

    /// Sum of all buckets; equals the number of classified records.
    pub fn total(&self) -> usize {
        PerformanceBand::ALL.iter().map(|b| self.count(*b)).sum()
    }
}

/// Qualitative reading of the attention/score co-moment sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    StrongPositive,
    ModeratePositive,
    Weak,
    Negative,
}

impl CorrelationStrength {
    /// Thresholds are calibrated to the unnormalised co-moment sum: > 10 strong, > 5 moderate,
    /// > -5 weak, otherwise negative.
    pub fn classify(co_moment: f64) -> Self {
        if co_moment > 10.0 {
            Self::StrongPositive
        } else if co_moment > 5.0 {
            Self::ModeratePositive
        } else if co_moment > -5.0 {
            Self::Weak
        } else {
            Self::Negative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StrongPositive => "Strong positive correlation",
            Self::ModeratePositive => "Moderate positive correlation",
            Self::Weak => "Weak correlation",
            Self::Negative => "Negative correlation",
        }
    }
}

/// The six rounded field averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub score: f64,
    pub comprehension: f64,
    pub attention: f64,
    pub focus: f64,
    pub retention: f64,
    pub engagement_time: f64,
}

impl Averages {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::AssessmentScore => self.score,
            Metric::Comprehension => self.comprehension,
            Metric::Attention => self.attention,
            Metric::Focus => self.focus,
            Metric::Retention => self.retention,
            Metric::EngagementTime => self.engagement_time,
        }
    }
}

/// Rounded average of one skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillAverage {
    pub skill: Metric,
    pub average: f64,
}

/// Min/max/range of the assessment score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Average score of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPerformance {
    pub class: String,
    pub avg_score: f64,
    pub student_count: usize,
}

/// Derived summary statistics of a record set under a class filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub class_filter: ClassFilter,
    pub total_students: usize,
    pub averages: Averages,
    /// Rounded averages of the four skills, in [`Metric::SKILLS`] order.
    pub skill_averages: Vec<SkillAverage>,
    pub score_range: ScoreRange,
    pub distribution: PerformanceDistribution,
    pub strongest_skill: SkillAverage,
    pub weakest_skill: SkillAverage,
    /// Unnormalised attention/score co-moment sum.
    pub attention_score_co_moment: f64,
    /// The co-moment sum divided by the record count.
    pub attention_score_co_moment_mean: f64,
    /// Label derived from [`Self::attention_score_co_moment`].
    pub correlation: CorrelationStrength,
    pub struggling_students: Vec<StudentRecord>,
    pub top_performers: Vec<StudentRecord>,
    /// Classes by descending average score; ties keep first-appearance order.
    pub class_performance: Vec<ClassPerformance>,
}

impl AggregateSnapshot {
    /// Returns `true` when the filter matched no records.
    pub fn is_empty(&self) -> bool {
        self.total_students == 0
    }
}

/// Returns `true` if the record needs additional support.
pub fn is_struggling(record: &StudentRecord) -> bool {
    record.score() < STRUGGLING_SCORE_BELOW
        || record.value(Metric::Attention) < STRUGGLING_SKILL_BELOW
        || record.value(Metric::Focus) < STRUGGLING_SKILL_BELOW
}

/// Returns `true` if the record performs well across score, attention and focus.
pub fn is_top_performer(record: &StudentRecord) -> bool {
    record.score() >= TOP_SCORE_MIN
        && record.value(Metric::Attention) >= TOP_SKILL_MIN
        && record.value(Metric::Focus) >= TOP_SKILL_MIN
}

/// Compute the snapshot for `records` narrowed by `class_filter`.
///
/// On an empty filtered set every statistic is zero and every list is empty.
pub fn aggregate<'a, I>(records: I, class_filter: &ClassFilter) -> AggregateSnapshot
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let filtered = filter_by_class(records, class_filter);
    let mean = |m: Metric| round_to_one_decimal(reduce(&filtered, m, ReduceOp::Mean));

    let averages = Averages {
        score: mean(Metric::AssessmentScore),
        comprehension: mean(Metric::Comprehension),
        attention: mean(Metric::Attention),
        focus: mean(Metric::Focus),
        retention: mean(Metric::Retention),
        engagement_time: mean(Metric::EngagementTime),
    };

    let skill_averages: Vec<SkillAverage> = Metric::SKILLS
        .iter()
        .map(|&skill| SkillAverage {
            skill,
            average: averages.get(skill),
        })
        .collect();
    let (strongest_skill, weakest_skill) = extreme_skills(&skill_averages);

    let min = reduce(&filtered, Metric::AssessmentScore, ReduceOp::Min);
    let max = reduce(&filtered, Metric::AssessmentScore, ReduceOp::Max);

    let mut distribution = PerformanceDistribution::default();
    for r in &filtered {
        distribution.add(PerformanceBand::for_score(r.score()));
    }

    let co_moment = co_moment_sum(&filtered, Metric::Attention, Metric::AssessmentScore);
    let co_moment_mean = if filtered.is_empty() {
        0.0
    } else {
        co_moment / filtered.len() as f64
    };

    AggregateSnapshot {
        class_filter: class_filter.clone(),
        total_students: filtered.len(),
        averages,
        skill_averages,
        score_range: ScoreRange {
            min,
            max,
            range: max - min,
        },
        distribution,
        strongest_skill,
        weakest_skill,
        attention_score_co_moment: co_moment,
        attention_score_co_moment_mean: co_moment_mean,
        correlation: CorrelationStrength::classify(co_moment),
        struggling_students: filtered.iter().copied().filter(|r| is_struggling(r)).cloned().collect(),
        top_performers: filtered.iter().copied().filter(|r| is_top_performer(r)).cloned().collect(),
        class_performance: class_ranking(&filtered),
    }
}

/// Strongest and weakest skill by an explicit fold over [`Metric::SKILLS`] order.
///
/// A later skill replaces the current pick only when strictly better (or worse), so ties resolve
/// to the first skill in the enumeration.
fn extreme_skills(skills: &[SkillAverage]) -> (SkillAverage, SkillAverage) {
    let first = skills.first().copied().unwrap_or(SkillAverage {
        skill: Metric::SKILLS[0],
        average: 0.0,
    });
    skills.iter().skip(1).fold((first, first), |(strong, weak), s| {
        let strong = if s.average > strong.average { *s } else { strong };
        let weak = if s.average < weak.average { *s } else { weak };
        (strong, weak)
    })
}

/// Group by class and rank by descending average score (stable on ties).
///
/// Records with a blank class are grouped under [`UNKNOWN_CLASS`].
pub fn class_ranking(records: &[&StudentRecord]) -> Vec<ClassPerformance> {
    let mut groups: IndexMap<&str, (usize, f64)> = IndexMap::new();
    for r in records {
        let class = if r.class.is_empty() { UNKNOWN_CLASS } else { r.class.as_str() };
        let entry = groups.entry(class).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.score();
    }

    let mut ranking: Vec<ClassPerformance> = groups
        .into_iter()
        .map(|(class, (count, total))| ClassPerformance {
            class: class.to_string(),
            avg_score: total / count as f64,
            student_count: count,
        })
        .collect();
    ranking.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
    ranking
}

/// Distinct non-empty class labels, sorted.
pub fn unique_classes<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    records
        .into_iter()
        .map(|r| r.class.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
