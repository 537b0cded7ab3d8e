//! Output formatters for duplicate reports.
//!
//! This module renders a built [`crate::report::Report`]:
//! - Text, the line-oriented default format
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use xxdupe::duplicates::DuplicateFinder;
//! use xxdupe::output::TextOutput;
//! use xxdupe::report::{GroupReporter, ReportOptions};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (index, _summary) = finder.find_duplicates(&[PathBuf::from(".")]).unwrap();
//! let report = GroupReporter::new(ReportOptions::default()).build(index);
//!
//! TextOutput::new(&report).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

use std::time::SystemTime;

use bytesize::ByteSize;
use chrono::{DateTime, Local};

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;

/// Timestamp layout used for member lines.
pub const TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Format a byte count for humans (IEC units).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Format a modification time in local time.
#[must_use]
pub fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(TIME_FORMAT).to_string()
}
