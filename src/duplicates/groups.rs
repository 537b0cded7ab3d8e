//! Duplicate groups.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] collects every file that produced one
//! [`Fingerprint`]. Because equal content implies equal length, all members
//! share a size; the size of the first-discovered member is the group's
//! *reference size*. The fingerprinter refuses files whose length no longer
//! matches the size listed at discovery, so a rewritten file cannot join a
//! group under a stale size.
//!
//! # Example
//!
//! ```
//! use xxdupe::duplicates::DuplicateGroup;
//! use xxdupe::scanner::{fingerprint_bytes, FileEntry};
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/a.txt"), 5, SystemTime::now()),
//!     FileEntry::new(PathBuf::from("/b.txt"), 5, SystemTime::now()),
//! ];
//! let group = DuplicateGroup::new(fingerprint_bytes(b"hello"), files);
//!
//! assert!(group.is_duplicate());
//! assert_eq!(group.duplicate_count(), 1);
//! assert_eq!(group.reference_size, 5);
//! ```

use std::cmp::Reverse;
use std::path::PathBuf;

use crate::scanner::{FileEntry, Fingerprint};

/// Files sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// XXH64 digest shared by every member
    pub fingerprint: Fingerprint,
    /// Size in bytes of the first-discovered member
    pub reference_size: u64,
    /// Member files, in discovery order unless re-sorted
    pub members: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new group.
    ///
    /// # Arguments
    ///
    /// * `fingerprint` - Content digest shared by the members
    /// * `members` - Member files; the first one fixes the reference size
    #[must_use]
    pub fn new(fingerprint: Fingerprint, members: Vec<FileEntry>) -> Self {
        let reference_size = members.first().map_or(0, |f| f.size);
        Self {
            fingerprint,
            reference_size,
            members,
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A group only counts as duplicates with two or more members.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.members.len() > 1
    }

    /// Number of redundant copies (members beyond the first).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    /// Bytes taken by the redundant copies.
    #[must_use]
    pub fn redundant_bytes(&self) -> u64 {
        self.reference_size * self.duplicate_count() as u64
    }

    /// Sort members by modification time, most recent first.
    ///
    /// The sort is stable: members with equal times keep discovery order.
    pub fn sort_by_recency(&mut self) {
        self.members.sort_by_key(|f| Reverse(f.modified));
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.members.iter().map(|f| f.path.clone()).collect()
    }
}
