//! The hosted sample dataset and its download variants.
//!
//! Both variants carry the same CSV bytes. The `.xls` variant only changes the file name and MIME
//! type, so it is not a binary workbook and spreadsheet ingestion rejects it.

use serde::{Deserialize, Serialize};

#[cfg(feature = "sample-download")]
use crate::error::DashboardResult;

/// Location of the synthetic 5000-student sample dataset (CSV).
pub const SAMPLE_DATASET_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/synthetic_student_dataset_5000-763xClDuVTA5vjMj5jEzYwF72q8DbP.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleVariant {
    Csv,
    Excel,
}

impl SampleVariant {
    pub const ALL: [SampleVariant; 2] = [SampleVariant::Csv, SampleVariant::Excel];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "sample_student_dataset.csv",
            Self::Excel => "sample_student_dataset.xls",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.ms-excel",
        }
    }
}

/// Sample bytes labelled for one download variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub variant: SampleVariant,
    pub bytes: Vec<u8>,
}

impl SampleFile {
    /// Label the downloaded CSV bytes; the content is the same for every variant.
    pub fn new(variant: SampleVariant, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            variant,
            bytes: bytes.into(),
        }
    }

    pub fn file_name(&self) -> &'static str {
        self.variant.file_name()
    }

    pub fn mime_type(&self) -> &'static str {
        self.variant.mime_type()
    }
}

/// Download the sample dataset and label it as `variant`.
#[cfg(feature = "sample-download")]
pub fn fetch_sample(variant: SampleVariant) -> DashboardResult<SampleFile> {
    use std::time::Duration;

    use reqwest::blocking::Client;

    let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
    let bytes = client
        .get(SAMPLE_DATASET_URL)
        .send()?
        .error_for_status()?
        .bytes()?;
    Ok(SampleFile::new(variant, bytes.to_vec()))
}
