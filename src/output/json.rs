//! JSON output formatter for duplicate reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "26c7827d889f6da3",
//!       "size": 5,
//!       "kept": null,
//!       "files": [
//!         { "path": "/data/b.txt", "size": 5, "modified": "2026-10-19T12:00:01+02:00" },
//!         { "path": "/data/a.txt", "size": 5, "modified": "2026-10-19T11:59:58+02:00" }
//!       ]
//!     }
//!   ],
//!   "summary": {
//!     "files_found": 3,
//!     "bytes_found": 15,
//!     "files_hashed": 3,
//!     "duplicate_groups": 1,
//!     "num_dupes": 1,
//!     "dupes_size": 5,
//!     "notices": [],
//!     "unreadable": [],
//!     "scan_duration_ms": 2,
//!     "exit_code": 0,
//!     "exit_code_name": "XD000"
//!   }
//! }
//! ```
//!
//! `hash` is omitted with `hide_hash` and `modified` with `hide_time`.

use std::io::Write;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::duplicates::ScanSummary;
use crate::error::ExitCode;
use crate::report::{Report, ReportGroup};
use crate::scanner::FileEntry;

/// A single file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFile {
    /// Path as discovered
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Modification time (RFC 3339, local offset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl JsonFile {
    fn from_entry(entry: &FileEntry, hide_time: bool) -> Self {
        Self {
            path: entry.path.to_string_lossy().into_owned(),
            size: entry.size,
            modified: (!hide_time).then(|| DateTime::<Local>::from(entry.modified).to_rfc3339()),
        }
    }
}

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// XXH64 fingerprint as 16 hex digits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Reference size in bytes
    pub size: u64,
    /// Most recent member, when hidden from `files`
    pub kept: Option<JsonFile>,
    /// Listed members, most recent first
    pub files: Vec<JsonFile>,
}

impl JsonDuplicateGroup {
    fn from_report_group(group: &ReportGroup, report: &Report) -> Self {
        let hide_time = report.options.hide_time;
        Self {
            hash: (!report.options.hide_hash).then(|| group.fingerprint.to_hex()),
            size: group.reference_size,
            kept: group
                .kept
                .as_ref()
                .map(|entry| JsonFile::from_entry(entry, hide_time)),
            files: group
                .members
                .iter()
                .map(|entry| JsonFile::from_entry(entry, hide_time))
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files that passed discovery
    pub files_found: usize,
    /// Cumulative size of discovered files in bytes
    pub bytes_found: u64,
    /// Files fingerprinted and indexed
    pub files_hashed: usize,
    /// Number of reported duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub num_dupes: usize,
    /// One reference size per duplicate group
    pub dupes_size: u64,
    /// Recoverable per-path notices
    pub notices: Vec<String>,
    /// Files skipped because they could not be read
    pub unreadable: Vec<String>,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "XD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a report, its scan summary and an exit code.
    #[must_use]
    pub fn new(report: &Report, summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            files_found: summary.files_found,
            bytes_found: summary.bytes_found,
            files_hashed: summary.files_hashed,
            duplicate_groups: report.groups.len(),
            num_dupes: report.num_dupes,
            dupes_size: report.dupes_size,
            notices: summary.notices.clone(),
            unreadable: summary.unreadable.clone(),
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Reported duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from a report, its summary and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use xxdupe::duplicates::ScanSummary;
    /// use xxdupe::error::ExitCode;
    /// use xxdupe::output::JsonOutput;
    /// use xxdupe::report::Report;
    ///
    /// let output = JsonOutput::new(&Report::default(), &ScanSummary::default(), ExitCode::NoDuplicates);
    /// assert!(output.duplicates.is_empty());
    /// assert_eq!(output.summary.exit_code, 2);
    /// ```
    #[must_use]
    pub fn new(report: &Report, summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: report
                .groups
                .iter()
                .map(|group| JsonDuplicateGroup::from_report_group(group, report))
                .collect(),
            summary: JsonSummary::new(report, summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
