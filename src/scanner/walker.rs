//! File discovery across one or more roots using jwalk.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which turns a list of root
//! paths into a flat list of [`FileEntry`] values that are regular files
//! (never symbolic links) within the configured [`SizeBounds`].
//!
//! - A root that does not exist is skipped without raising an error.
//! - A directory root is traversed recursively (hidden entries included).
//! - A regular-file root is canonicalized and included directly.
//!
//! Paths that vanish or become inaccessible mid-walk are collected as
//! [`ScanError`] notices; the walk itself never fails.
//!
//! # Example
//!
//! ```no_run
//! use xxdupe::scanner::{SizeBounds, Walker};
//! use std::path::PathBuf;
//!
//! let walker = Walker::new(vec![PathBuf::from("/home/user/Downloads")], SizeBounds::default());
//! let discovery = walker.discover();
//! println!("{} files, {} bytes", discovery.file_count(), discovery.total_size);
//! for notice in &discovery.notices {
//!     eprintln!("Warning: {notice}");
//! }
//! ```

use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use jwalk::WalkDir;

use super::{FileEntry, ScanError, SizeBounds};
use crate::progress::ProgressCallback;

/// Result of a discovery pass.
///
/// Holds the eligible files in discovery order together with the running
/// totals that were reported to the progress observer.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Eligible files, in discovery order
    pub files: Vec<FileEntry>,
    /// Sum of the sizes of all eligible files
    pub total_size: u64,
    /// Recoverable per-path problems met along the way
    pub notices: Vec<ScanError>,
    /// Whether discovery stopped early because shutdown was requested
    pub interrupted: bool,
}

impl Discovery {
    /// Number of eligible files found.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn push(&mut self, entry: FileEntry) {
        self.total_size += entry.size;
        self.files.push(entry);
    }
}

/// Walker for file discovery over a set of roots.
pub struct Walker {
    /// Roots to scan, in the order given
    roots: Vec<PathBuf>,
    /// Size filter applied to every candidate file
    bounds: SizeBounds,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional observer receiving file count / cumulative size updates
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("roots", &self.roots)
            .field("bounds", &self.bounds)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given roots.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, bounds: SizeBounds) -> Self {
        Self {
            roots,
            bounds,
            shutdown_flag: None,
            progress_callback: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set, the walker stops as soon as possible and marks
    /// the [`Discovery`] as interrupted.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress observer.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Discover all eligible files under every root.
    ///
    /// Never fails: per-path problems end up in [`Discovery::notices`].
    #[must_use]
    pub fn discover(&self) -> Discovery {
        let mut discovery = Discovery::default();

        for root in &self.roots {
            if self.is_shutdown_requested() {
                discovery.interrupted = true;
                break;
            }
            self.discover_root(root, &mut discovery);
            if discovery.interrupted {
                break;
            }
        }

        discovery
    }

    fn discover_root(&self, root: &Path, discovery: &mut Discovery) {
        // Follows symlinks, so a linked directory is still walked
        let metadata = match fs::metadata(root) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("Skipping missing path: {}", root.display());
                return;
            }
            Err(e) => {
                discovery.notices.push(io_notice(root, e));
                return;
            }
        };

        if metadata.is_dir() {
            let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
            log::info!(
                "Creating list of files from {}, this could take a while ...",
                root.display()
            );
            let before = discovery.file_count();
            self.walk_directory(&root, discovery);
            log::info!(
                "{} files found ({}).",
                discovery.file_count() - before,
                bytesize::ByteSize::b(discovery.total_size)
            );
        } else {
            self.add_root_file(root, discovery);
        }
    }

    fn add_root_file(&self, root: &Path, discovery: &mut Discovery) {
        let is_symlink = fs::symlink_metadata(root).is_ok_and(|m| m.file_type().is_symlink());
        if is_symlink {
            log::debug!("Skipping symlink root: {}", root.display());
            return;
        }

        let resolved = match fs::canonicalize(root) {
            Ok(p) => p,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("Path vanished before it could be read: {}", root.display());
                discovery.notices.push(ScanError::NotFound(root.to_path_buf()));
                return;
            }
            Err(e) => {
                discovery.notices.push(io_notice(root, e));
                return;
            }
        };

        match self.inspect(&resolved) {
            Ok(Some(entry)) => {
                log::info!("Reading {} file.", entry.path.display());
                discovery.push(entry);
                self.report(discovery);
            }
            Ok(None) => {}
            Err(notice) => discovery.notices.push(notice),
        }
    }

    fn walk_directory(&self, root: &Path, discovery: &mut Discovery) {
        let walk_dir = WalkDir::new(root)
            .follow_links(false)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        for entry_result in walk_dir {
            if self.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping iteration");
                discovery.interrupted = true;
                return;
            }

            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| root.to_path_buf(), std::borrow::ToOwned::to_owned);
                    log::warn!("Walker error for {}: {}", path.display(), e);
                    discovery.notices.push(ScanError::Io {
                        path,
                        source: std::io::Error::other(e.to_string()),
                    });
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            let path = entry.path();
            if file_type.is_symlink() {
                log::trace!("Skipping symlink: {}", path.display());
                continue;
            }

            match self.inspect(&path) {
                Ok(Some(file)) => {
                    discovery.push(file);
                    self.report(discovery);
                }
                Ok(None) => {}
                Err(notice) => discovery.notices.push(notice),
            }
        }
    }

    /// Re-stat a candidate and build a [`FileEntry`] if it qualifies.
    ///
    /// Returns `Ok(None)` for entries that are legitimately excluded
    /// (symlinks, special files, out-of-bounds sizes).
    fn inspect(&self, path: &Path) -> Result<Option<FileEntry>, ScanError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| io_notice(path, e))?;
        Ok(self.qualify(path, &metadata))
    }

    fn qualify(&self, path: &Path, metadata: &Metadata) -> Option<FileEntry> {
        if metadata.file_type().is_symlink() || !metadata.is_file() {
            return None;
        }

        let size = metadata.len();
        if !self.bounds.accepts(size) {
            log::trace!(
                "Skipping file due to size filter ({}): {}",
                size,
                path.display()
            );
            return None;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        Some(FileEntry::new(path.to_path_buf(), size, modified))
    }

    fn report(&self, discovery: &Discovery) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_files_found(discovery.file_count(), discovery.total_size);
        }
    }
}

/// Convert an I/O error on `path` into a discovery notice.
fn io_notice(path: &Path, error: std::io::Error) -> ScanError {
    match error.kind() {
        ErrorKind::PermissionDenied => {
            log::warn!("Permission denied: {}", path.display());
            ScanError::PermissionDenied(path.to_path_buf())
        }
        ErrorKind::NotFound => {
            log::warn!("File not found (may have been deleted): {}", path.display());
            ScanError::NotFound(path.to_path_buf())
        }
        _ => {
            log::warn!("I/O error for {}: {}", path.display(), error);
            ScanError::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}
