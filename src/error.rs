use thiserror::Error;

/// Convenience result type used across the crate.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type returned by ingestion, validation, report export and sample download.
///
/// A batch either fully succeeds or is fully rejected; every variant is meant to be shown to the
/// user as a single human-readable message. Numeric coercion never produces an error (see
/// [`crate::record::coerce_numeric_or_zero`]).
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV tokenizer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "sample-download")]
    /// Sample dataset download failed (feature-gated behind `sample-download`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The input is empty or could not be turned into rows.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The first row is missing one or more required columns.
    ///
    /// `missing` lists every absent column, in required-column order.
    #[error("missing required columns: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    /// The file name does not map to a supported input format.
    #[error("unsupported file format: {name}")]
    UnsupportedFormat { name: String },
}

impl DashboardError {
    pub(crate) fn empty_file() -> Self {
        Self::Parse {
            message: "empty file".to_string(),
        }
    }
}
