//! Scanner module for file discovery and content fingerprinting.
//!
//! This module provides functionality for:
//! - Size filtering with strict (exclusive) bounds
//! - Directory walking using jwalk
//! - XXH64 content fingerprints
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`bounds`]: The size predicate applied during discovery
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: XXH64 file fingerprinting (streaming)
//!
//! # Example
//!
//! ```no_run
//! use xxdupe::scanner::{SizeBounds, Walker};
//! use std::path::PathBuf;
//!
//! let walker = Walker::new(vec![PathBuf::from(".")], SizeBounds::new(1024, 1 << 30));
//! let discovery = walker.discover();
//! for file in &discovery.files {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

pub mod bounds;
pub mod hasher;
pub mod walker;

use std::path::PathBuf;
use std::time::SystemTime;

// Re-export main types
pub use bounds::{accepts, SizeBounds, DEFAULT_MAX_SIZE};
pub use hasher::{fingerprint_bytes, Fingerprint, Fingerprinter};
pub use walker::{Discovery, Walker};

/// Metadata for a discovered file.
///
/// Created during discovery and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileEntry {
    /// Create a new FileEntry.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
        }
    }
}

/// Recoverable problems met while discovering files.
///
/// None of these stop a scan; they are collected as notices.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path vanished before it could be inspected.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file disappeared between discovery and hashing.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The file was rewritten with a different length after discovery.
    #[error("File changed during scan: {path} ({expected} bytes listed, {actual} bytes read)")]
    Changed {
        /// Path of the file
        path: PathBuf,
        /// Size recorded at discovery
        expected: u64,
        /// Number of bytes actually hashed
        actual: u64,
    },

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Build a `HashError` from an I/O error, classifying it by kind.
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Whether the file simply vanished (a recoverable condition).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the file vanished or changed under the scan. Both are
    /// notices rather than read failures.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Changed { .. })
    }
}
