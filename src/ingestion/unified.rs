//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_bytes`] (an uploaded buffer plus its file name) or
//! [`ingest_from_path`]. Both run the whole pipeline:
//!
//! 1. pick the format (forced via [`IngestionOptions::format`] or inferred from the extension)
//! 2. parse into raw rows ([`parse_bytes`])
//! 3. validate the required columns ([`crate::validation::validate`])
//! 4. build the session [`RecordSet`]
//!
//! If an [`IngestionObserver`] is configured, the outcome is reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{DashboardError, DashboardResult};
use crate::record::{Metric, RecordSet};
use crate::types::RawRow;
use crate::validation;

use super::csv;
use super::observability::{
    severity_for_error, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values (no quoting).
    Csv,
    /// Spreadsheet/workbook formats, first sheet only (feature-gated behind `excel`).
    Spreadsheet,
}

impl SourceFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Infer the format from a file name or path.
    pub fn from_file_name(name: &str) -> DashboardResult<Self> {
        Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| DashboardError::UnsupportedFormat {
                name: name.to_string(),
            })
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<SourceFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Parse raw bytes in the declared format into raw rows.
///
/// Pure transform over the buffer; no validation happens here.
pub fn parse_bytes(bytes: &[u8], format: SourceFormat) -> DashboardResult<Vec<RawRow>> {
    match format {
        SourceFormat::Csv => csv::parse_csv_bytes(bytes),
        SourceFormat::Spreadsheet => parse_spreadsheet_dispatch(bytes),
    }
}

/// Ingest an uploaded buffer into a validated [`RecordSet`].
///
/// `source` is the upload's file name; it drives format inference and is reported to the
/// observer.
///
/// ```
/// use student_performance::ingestion::{ingest_bytes, IngestionOptions};
///
/// # fn main() -> Result<(), student_performance::DashboardError> {
/// let csv = "student_id,name,class,comprehension,attention,focus,retention,assessment_score,engagement_time\n\
///            1,Ada,X,90,85,85,90,95,30\n";
/// let records = ingest_bytes("scores.csv", csv.as_bytes(), &IngestionOptions::default())?;
/// assert_eq!(records.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn ingest_bytes(
    source: &str,
    bytes: &[u8],
    options: &IngestionOptions,
) -> DashboardResult<RecordSet> {
    let format = match options.format {
        Some(f) => Ok(f),
        None => SourceFormat::from_file_name(source),
    };
    let ctx = IngestionContext {
        source: source.to_string(),
        format: format.as_ref().ok().copied(),
    };

    let result = format
        .and_then(|f| parse_bytes(bytes, f))
        .and_then(validation::validate)
        .map(validation::into_record_set);

    report(options, &ctx, &result);
    result
}

/// Ingest a file on disk into a validated [`RecordSet`].
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> DashboardResult<RecordSet> {
    let path = path.as_ref();
    let source = path.display().to_string();
    match std::fs::read(path) {
        Ok(bytes) => ingest_bytes(&source, &bytes, options),
        Err(e) => {
            let ctx = IngestionContext {
                format: options.format.or_else(|| SourceFormat::from_file_name(&source).ok()),
                source,
            };
            let result = Err(DashboardError::Io(e));
            report(options, &ctx, &result);
            result
        }
    }
}

fn report(options: &IngestionOptions, ctx: &IngestionContext, result: &DashboardResult<RecordSet>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(records) => obs.on_success(ctx, stats_for(records)),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn stats_for(records: &RecordSet) -> IngestionStats {
    let blank_numeric_cells = records
        .iter()
        .map(|r| Metric::ALL.iter().filter(|m| r.raw(**m).is_blank()).count())
        .sum();
    IngestionStats {
        records: records.len(),
        blank_numeric_cells,
    }
}

fn parse_spreadsheet_dispatch(bytes: &[u8]) -> DashboardResult<Vec<RawRow>> {
    #[cfg(feature = "excel")]
    {
        super::excel::parse_spreadsheet_bytes(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = bytes;
        Err(DashboardError::UnsupportedFormat {
            name: "spreadsheet (enable cargo feature 'excel')".to_string(),
        })
    }
}
