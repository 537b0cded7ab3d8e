//! Fingerprint index: the aggregation core of a scan.
//!
//! [`DuplicateIndex`] maps each [`Fingerprint`] to the files that produced
//! it. It only grows during a run and is safe to fill from many hashing
//! workers at once: the backing [`DashMap`] locks one shard per insertion,
//! so writers of different fingerprints rarely contend.
//!
//! Members keep their discovery position. Parallel workers may finish out
//! of order, so [`DuplicateIndex::into_groups`] restores discovery order;
//! no other ordering is applied here (see [`crate::report`]).

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use super::DuplicateGroup;
use crate::scanner::{FileEntry, Fingerprint};

#[derive(Debug, Clone)]
struct Member {
    position: usize,
    entry: FileEntry,
}

/// Concurrent multimap from fingerprint to the files sharing it.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    buckets: DashMap<Fingerprint, Vec<Member>>,
    next_position: AtomicUsize,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the group for `fingerprint`, creating it if absent.
    ///
    /// The entry is positioned after everything inserted so far.
    pub fn insert(&self, fingerprint: Fingerprint, entry: FileEntry) {
        let position = self.next_position.fetch_add(1, Ordering::SeqCst);
        self.push(fingerprint, position, entry);
    }

    /// Append `entry` with an explicit discovery position.
    ///
    /// Used by parallel workers so that group membership order follows
    /// discovery order regardless of which worker finishes first.
    pub fn insert_at(&self, fingerprint: Fingerprint, position: usize, entry: FileEntry) {
        self.next_position.fetch_max(position + 1, Ordering::SeqCst);
        self.push(fingerprint, position, entry);
    }

    fn push(&self, fingerprint: Fingerprint, position: usize, entry: FileEntry) {
        self.buckets
            .entry(fingerprint)
            .or_default()
            .push(Member { position, entry });
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of files across all fingerprints.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.value().len()).sum()
    }

    /// Files sharing `fingerprint`, in discovery order.
    #[must_use]
    pub fn members(&self, fingerprint: &Fingerprint) -> Option<Vec<FileEntry>> {
        self.buckets
            .get(fingerprint)
            .map(|bucket| in_discovery_order(bucket.value().clone()))
    }

    /// Consume the index into groups, one per fingerprint.
    ///
    /// Groups are ordered by the discovery position of their first member,
    /// and members keep discovery order. Singleton groups are included.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        let mut keyed: Vec<(usize, DuplicateGroup)> = self
            .buckets
            .into_iter()
            .filter_map(|(fingerprint, mut members)| {
                members.sort_by_key(|m| m.position);
                let first_position = members.first()?.position;
                let entries = members.into_iter().map(|m| m.entry).collect();
                Some((first_position, DuplicateGroup::new(fingerprint, entries)))
            })
            .collect();
        keyed.sort_by_key(|(position, _)| *position);
        keyed.into_iter().map(|(_, group)| group).collect()
    }
}

fn in_discovery_order(mut members: Vec<Member>) -> Vec<FileEntry> {
    members.sort_by_key(|m| m.position);
    members.into_iter().map(|m| m.entry).collect()
}
