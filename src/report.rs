//! Turning a finished index into a duplicate report.
//!
//! [`GroupReporter`] applies the reporting policy to a [`DuplicateIndex`]:
//!
//! 1. Groups are ordered by ascending reference size, so the biggest wins
//!    come last. Ties keep discovery order.
//! 2. Only groups with more than one member are reported.
//! 3. Members are ordered by modification time, most recent first.
//! 4. With `hide_recent`, the most recent member is treated as the kept
//!    original and left out of the listed members. It still counts towards
//!    [`Report::num_dupes`].
//! 5. [`Report::num_dupes`] counts members beyond the first in each group.
//!    [`Report::dupes_size`] adds one reference size per group, which is a
//!    lower bound on the wasted space whenever a group has three or more
//!    members.
//!
//! Rendering lives in [`crate::output`].

use serde::{Deserialize, Serialize};

use crate::duplicates::{DuplicateGroup, DuplicateIndex};
use crate::scanner::{FileEntry, Fingerprint};

/// Presentation switches for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Leave the most recently modified member out of each listed group
    pub hide_recent: bool,
    /// Omit the per-group fingerprint header
    pub hide_hash: bool,
    /// Omit modification timestamps from member lines
    pub hide_time: bool,
}

/// One reported duplicate group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    /// Shared content fingerprint
    pub fingerprint: Fingerprint,
    /// Size of the first-discovered member
    pub reference_size: u64,
    /// The member hidden by `hide_recent`, if any
    pub kept: Option<FileEntry>,
    /// Listed members, most recently modified first
    pub members: Vec<FileEntry>,
}

/// The post-processed scan result, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Duplicate groups in reporting order
    pub groups: Vec<ReportGroup>,
    /// Redundant copies across all groups
    pub num_dupes: usize,
    /// One reference size per duplicate group
    pub dupes_size: u64,
    /// Whether the index held no files at all
    pub index_empty: bool,
    /// Presentation switches used to build this report
    pub options: ReportOptions,
}

impl Report {
    /// Whether any duplicate group was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// Applies the grouping and sorting policy to an index.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupReporter {
    options: ReportOptions,
}

impl GroupReporter {
    /// Create a reporter with the given options.
    #[must_use]
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Build the report for a finished index.
    #[must_use]
    pub fn build(&self, index: DuplicateIndex) -> Report {
        self.build_from_groups(index.into_groups())
    }

    /// Build the report from groups in discovery order.
    #[must_use]
    pub fn build_from_groups(&self, mut groups: Vec<DuplicateGroup>) -> Report {
        let mut report = Report {
            index_empty: groups.is_empty(),
            options: self.options,
            ..Report::default()
        };

        groups.sort_by_key(|g| g.reference_size);

        for mut group in groups.into_iter().filter(DuplicateGroup::is_duplicate) {
            report.num_dupes += group.duplicate_count();
            report.dupes_size += group.reference_size;

            group.sort_by_recency();
            let kept = if self.options.hide_recent {
                Some(group.members.remove(0))
            } else {
                None
            };

            report.groups.push(ReportGroup {
                fingerprint: group.fingerprint,
                reference_size: group.reference_size,
                kept,
                members: group.members,
            });
        }

        log::debug!(
            "Report: {} groups, {} duplicates, {} bytes",
            report.groups.len(),
            report.num_dupes,
            report.dupes_size
        );
        report
    }
}
