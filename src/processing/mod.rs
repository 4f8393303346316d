//! In-memory statistics and views over a [`crate::record::RecordSet`].
//!
//! Everything here is a pure function of its inputs and is recomputed in full on every call;
//! nothing is cached or updated incrementally.
//!
//! - [`aggregate()`]: summary statistics under a class filter
//! - [`view()`]: search + class filter + sort for tabular display
//! - [`recommendations()`] and [`summarize_view()`]: actionable insights and the table summary
//! - [`reduce()`]: single-metric reductions (count/sum/mean/min/max)
//! - [`filter()`]: record filtering by predicate
//!
//! ## Example
//!
//! ```rust
//! use student_performance::ingestion::{ingest_bytes, IngestionOptions};
//! use student_performance::processing::{aggregate, view, ClassFilter, ViewQuery};
//!
//! # fn main() -> Result<(), student_performance::DashboardError> {
//! let csv = "student_id,name,class,comprehension,attention,focus,retention,assessment_score,engagement_time\n\
//!            1,A,X,90,85,85,90,95,30\n\
//!            2,B,X,50,40,40,50,55,10\n";
//! let records = ingest_bytes("scores.csv", csv.as_bytes(), &IngestionOptions::default())?;
//!
//! let snapshot = aggregate(&records, &ClassFilter::All);
//! assert_eq!(snapshot.averages.score, 75.0);
//! assert_eq!(snapshot.distribution.excellent, 1);
//!
//! let rows = view(&records, &ViewQuery::default());
//! assert_eq!(rows[0].name, "A");
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod filter;
pub mod insights;
pub mod reduce;
pub mod view;

pub use aggregate::{
    aggregate, class_ranking, is_struggling, is_top_performer, unique_classes, AggregateSnapshot,
    Averages, ClassPerformance, CorrelationStrength, PerformanceBand, PerformanceDistribution,
    ScoreRange, SkillAverage, UNKNOWN_CLASS,
};
pub use filter::{filter, filter_by_class, ClassFilter, ALL_CLASSES};
pub use insights::{
    recommendations, summarize_view, Recommendation, ViewSummary, ATTENTION_LEVERAGE_ABOVE,
    SUPPORT_PROGRAM_SHARE,
};
pub use reduce::{co_moment_sum, reduce, round_to_one_decimal, ReduceOp};
pub use view::{matches_search, view, SortDirection, SortField, SortState, ViewQuery};
