//! Wire types shared between the HTTP surface and the history store

use crate::extractor::{EmailRecord, ExtractionReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body for a successful or failed extraction request
///
/// Invariants on success: `emails[i] == data[i].email` for all `i`, `emails`
/// holds no case-insensitive duplicates, `total == emails.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,

    pub total: usize,

    /// Addresses in display order
    pub emails: Vec<String>,

    /// Per-address records, same order as `emails`
    pub data: Vec<EmailRecord>,

    /// Artifact filenames for later download, when the job was persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<ResultFiles>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Build a success response from an extraction report
    #[must_use]
    pub fn from_report(report: ExtractionReport, files: Option<ResultFiles>) -> Self {
        Self {
            success: true,
            total: report.total(),
            emails: report.emails,
            data: report.data,
            files,
            error: None,
        }
    }
}

/// Persisted artifact pair for one extraction job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultFiles {
    pub json: String,
    pub csv: String,
}

/// On-disk JSON artifact for one extraction job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredExtraction {
    /// Original filename, or "Pasted Text" for text jobs
    pub source_file: String,

    pub extraction_time: DateTime<Utc>,

    pub total_emails: usize,

    pub emails: Vec<EmailRecord>,
}

impl StoredExtraction {
    /// Snapshot a report for persistence, stamped with the current time
    #[must_use]
    pub fn new(source: impl Into<String>, report: &ExtractionReport) -> Self {
        Self {
            source_file: source.into(),
            extraction_time: Utc::now(),
            total_emails: report.total(),
            emails: report.data.clone(),
        }
    }
}

/// One row in the history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// JSON artifact filename; the CSV sibling is an extension swap away
    pub filename: String,

    pub source: String,

    pub total: usize,

    pub time: DateTime<Utc>,
}

/// Response body for `/api/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub extractions: Vec<HistoryEntry>,
}

/// Request body for `/api/extract-text`
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Request body for `/api/download-csv`
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRequest {
    pub emails: Vec<String>,
}
