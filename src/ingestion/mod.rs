//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_bytes`] or [`ingest_from_path`] (from [`unified`]) which:
//!
//! - pick the input format from the file extension (or [`IngestionOptions::format`])
//! - parse, validate and build a [`crate::record::RecordSet`]
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific parsers are also available under:
//! - [`csv`]
//! - `excel` (cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use observability::{
    severity_for_error, CompositeObserver, FileObserver, IngestionContext, IngestionObserver,
    IngestionSeverity, IngestionStats, StdErrObserver,
};
pub use unified::{ingest_bytes, ingest_from_path, parse_bytes, IngestionOptions, SourceFormat};
