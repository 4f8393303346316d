use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::error::DashboardError;

use super::unified::SourceFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (upload rejected).
    Error,
    /// Critical error (typically I/O failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// File name or path of the upload.
    pub source: String,
    /// Format used for parsing, if it could be determined.
    pub format: Option<SourceFormat>,
}

/// Stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of records accepted.
    pub records: usize,
    /// Number of blank numeric cells that will read as zero.
    pub blank_numeric_cells: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when an upload is accepted.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when an upload is rejected.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &DashboardError) {}

    /// Called when a rejection meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Classify an error for observer callbacks.
pub fn severity_for_error(e: &DashboardError) -> IngestionSeverity {
    match e {
        DashboardError::Io(_) => IngestionSeverity::Critical,
        DashboardError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        DashboardError::Excel(calamine::Error::Io(_)) => IngestionSeverity::Critical,
        #[cfg(feature = "excel")]
        DashboardError::Excel(_) => IngestionSeverity::Error,
        #[cfg(feature = "sample-download")]
        DashboardError::Http(_) => IngestionSeverity::Critical,
        DashboardError::Json(_)
        | DashboardError::Parse { .. }
        | DashboardError::Validation { .. }
        | DashboardError::UnsupportedFormat { .. } => IngestionSeverity::Error,
    }
}

/// One observed outcome, rendered as a single `key=value` log line.
enum Event<'a> {
    Accepted(&'a IngestionContext, IngestionStats),
    Rejected(&'a IngestionContext, IngestionSeverity, &'a DashboardError),
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ctx, outcome) = match self {
            Event::Accepted(ctx, _) => (ctx, "accepted"),
            Event::Rejected(ctx, _, _) => (ctx, "rejected"),
        };
        let format = match ctx.format {
            Some(SourceFormat::Csv) => "csv",
            Some(SourceFormat::Spreadsheet) => "spreadsheet",
            None => "unknown",
        };
        write!(f, "upload={} format={format} outcome={outcome}", ctx.source)?;
        match self {
            Event::Accepted(_, stats) => write!(
                f,
                " records={} blank_metric_cells={}",
                stats.records, stats.blank_numeric_cells
            ),
            Event::Rejected(_, severity, error) => {
                write!(f, " severity={} reason=\"{error}\"", format!("{severity:?}").to_lowercase())
            }
        }
    }
}

/// Forwards every callback to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }

    fn each(&self, call: impl Fn(&dyn IngestionObserver)) {
        self.observers.iter().for_each(|o| call(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Prints one line per upload outcome to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        eprintln!("student-performance: {}", Event::Accepted(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        eprintln!("student-performance: {}", Event::Rejected(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        eprintln!("student-performance: ALERT {}", Event::Rejected(ctx, severity, error));
    }
}

/// Appends timestamped upload outcomes to a log file.
///
/// Logging never fails an upload: open and write errors are dropped.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn record(&self, tag: &str, event: Event<'_>) {
        let _guard = self.lock.lock().ok();
        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) else {
            return;
        };
        let _ = writeln!(file, "{} {tag}{event}", Utc::now().to_rfc3339());
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.record("", Event::Accepted(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        self.record("", Event::Rejected(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        self.record("ALERT ", Event::Rejected(ctx, severity, error));
    }
}
