//! `student-performance` ingests student performance spreadsheets into typed
//! [`record::StudentRecord`]s, computes class statistics and insights over them, and projects a
//! paginated summary report.
//!
//! The primary entrypoint is [`ingestion::ingest_bytes`] (or [`ingestion::ingest_from_path`]),
//! which picks the input format from the file extension, parses it, validates the header and
//! returns a [`record::RecordSet`].
//!
//! ## What you can ingest
//!
//! **File formats (auto-detected by extension):**
//!
//! - **CSV**: `.csv` (header row, comma separated, no quoting)
//! - **Excel/workbooks** (requires the Cargo feature `excel`, on by default): `.xlsx`, `.xls`,
//!   `.xlsm`, `.xlsb`, `.ods`; only the first sheet is read
//!
//! **Required columns:** `student_id`, `name`, `class`, `comprehension`, `attention`, `focus`,
//! `retention`, `assessment_score`, `engagement_time`. Extra columns are kept on the record.
//! Metric cells that are blank or not numeric count as `0` in every statistic.
//!
//! ## Quick example
//!
//! ```no_run
//! use student_performance::ingestion::{ingest_from_path, IngestionOptions};
//! use student_performance::processing::{aggregate, ClassFilter};
//!
//! # fn main() -> Result<(), student_performance::DashboardError> {
//! let records = ingest_from_path("students.xlsx", &IngestionOptions::default())?;
//! let snapshot = aggregate(&records, &ClassFilter::parse("10A"));
//! println!(
//!     "students={} avg={} correlation={}",
//!     snapshot.total_students,
//!     snapshot.averages.score,
//!     snapshot.correlation.label()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified ingestion entrypoints, CSV/spreadsheet parsers and observers
//! - [`validation`]: required-column check
//! - [`record`]: typed records and numeric coercion
//! - [`processing`]: statistics, insights, filtering and sorted views
//! - [`report`]: report projection, pagination and text/JSON export
//! - [`session`]: immutable dashboard state and its transitions
//! - [`sample`]: the hosted sample dataset (download behind the `sample-download` feature)
//! - [`types`]: raw cell and row types
//! - [`error`]: error types used across the crate

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod record;
pub mod report;
pub mod sample;
pub mod session;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::{DashboardError, DashboardResult};
