//! Plain text report.
//!
//! Each duplicate group is printed as:
//!
//! ```text
//! Hash 26c7827d889f6da3 - (5 B)
//! -------------------------
//! 19-10-2026 12:00:01:"/data/b.txt"
//! 19-10-2026 11:59:58:"/data/a.txt"
//!
//! ```
//!
//! followed by a single summary line. The header lines disappear with
//! `hide_hash` and the timestamps with `hide_time`.

use std::io::{self, Write};

use super::{format_size, format_time};
use crate::report::{Report, ReportGroup};
use crate::scanner::FileEntry;

/// Line printed under each group header.
pub const SEPARATOR: &str = "-------------------------";

/// Printed instead of any group when nothing was fingerprinted.
pub const NO_DUPLICATES_NOTICE: &str = "No duplicated files found.";

/// Text formatter for a [`Report`].
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    report: &'a Report,
}

impl<'a> TextOutput<'a> {
    /// Wrap a report for rendering.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Write the full report to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.report.index_empty {
            writeln!(writer, "{NO_DUPLICATES_NOTICE}")?;
            return writer.flush();
        }

        for group in &self.report.groups {
            self.write_group(writer, group)?;
        }

        writeln!(
            writer,
            "  * {} duplicate files ({}).",
            self.report.num_dupes,
            format_size(self.report.dupes_size)
        )?;
        writer.flush()
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn write_group<W: Write>(&self, writer: &mut W, group: &ReportGroup) -> io::Result<()> {
        let options = self.report.options;
        if !options.hide_hash {
            writeln!(
                writer,
                "Hash {} - ({})",
                group.fingerprint,
                format_size(group.reference_size)
            )?;
            writeln!(writer, "{SEPARATOR}")?;
        }
        for member in &group.members {
            writeln!(writer, "{}", member_line(member, options.hide_time))?;
        }
        writeln!(writer)
    }
}

fn member_line(member: &FileEntry, hide_time: bool) -> String {
    let path = member.path.display();
    if hide_time {
        format!("\"{path}\"")
    } else {
        format!("{}:\"{path}\"", format_time(member.modified))
    }
}
