//! Duplicate finder: discovery followed by parallel fingerprinting.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the scan pipeline:
//! 1. **Walk** - collect eligible files from every root ([`Walker`])
//! 2. **Hash** - fingerprint each file on a bounded rayon pool and insert
//!    the result into a shared [`DuplicateIndex`]
//!
//! Error policy:
//! - Paths that vanish (during walking or before hashing) and files whose
//!   length changed after discovery are recoverable notices recorded in the
//!   [`ScanSummary`].
//! - Any other read failure is fatal ([`FinderError::Unreadable`]) unless
//!   [`FinderConfig::skip_unreadable`] is set, in which case the file is
//!   logged, counted and skipped.
//! - A shutdown request aborts the run with [`FinderError::Interrupted`];
//!   no partial index is returned.
//!
//! # Example
//!
//! ```no_run
//! use xxdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_jobs(8));
//! let (index, summary) = finder.find_duplicates(&[PathBuf::from(".")]).unwrap();
//! println!("{} files hashed into {} fingerprints", summary.files_hashed, index.len());
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::DuplicateIndex;
use crate::progress::{ProgressCallback, PHASE_HASHING, PHASE_WALKING};
use crate::scanner::{FileEntry, Fingerprinter, HashError, SizeBounds, Walker};

/// Default number of hashing workers.
pub const DEFAULT_JOBS: usize = 4;

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Size filter applied during discovery.
    pub bounds: SizeBounds,
    /// Number of hashing worker threads.
    /// Default is 4 to prevent disk thrashing.
    pub jobs: usize,
    /// Skip unreadable files instead of aborting the run.
    pub skip_unreadable: bool,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("bounds", &self.bounds)
            .field("jobs", &self.jobs)
            .field("skip_unreadable", &self.skip_unreadable)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            bounds: SizeBounds::default(),
            jobs: DEFAULT_JOBS,
            skip_unreadable: false,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the size bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: SizeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the hashing worker count (at least one).
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Skip unreadable files instead of failing the run.
    #[must_use]
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
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
}

/// Summary statistics from a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Files that passed discovery
    pub files_found: usize,
    /// Cumulative size of those files in bytes
    pub bytes_found: u64,
    /// Files successfully fingerprinted and indexed
    pub files_hashed: usize,
    /// Recoverable per-path notices (vanished or inaccessible paths)
    pub notices: Vec<String>,
    /// Files skipped because they could not be read
    pub unreadable: Vec<String>,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Whether anything went wrong without stopping the scan.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.notices.is_empty() || !self.unreadable.is_empty()
    }

    fn record_skipped(&mut self, skipped: Vec<Skipped>) {
        for skip in skipped {
            match skip {
                Skipped::Notice(notice) => self.notices.push(notice),
                Skipped::Unreadable(notice) => self.unreadable.push(notice),
            }
        }
    }
}

/// Errors that stop a scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// A file could not be read during fingerprinting.
    #[error(transparent)]
    Unreadable(HashError),

    /// The hashing worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A file left out of the index without failing the run.
#[derive(Debug)]
enum Skipped {
    /// Vanished or changed after discovery
    Notice(String),
    Unreadable(String),
}

/// Duplicate finder that orchestrates discovery and hashing.
pub struct DuplicateFinder {
    config: FinderConfig,
    fingerprinter: Fingerprinter,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut fingerprinter = Fingerprinter::new();
        if let Some(ref flag) = config.shutdown_flag {
            fingerprinter = fingerprinter.with_shutdown_flag(flag.clone());
        }
        Self {
            config,
            fingerprinter,
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Scan `paths` and build the fingerprint index.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The scan is interrupted by shutdown signal
    /// - A file cannot be read and `skip_unreadable` is off
    /// - The worker pool cannot be created
    pub fn find_duplicates(
        &self,
        paths: &[PathBuf],
    ) -> Result<(DuplicateIndex, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!("Building file list from {} path(s) ...", paths.len());
        let discovery = self.walk(paths);
        if discovery.interrupted || self.config.is_shutdown_requested() {
            log::info!("Interrupted during discovery");
            return Err(FinderError::Interrupted);
        }

        summary.files_found = discovery.file_count();
        summary.bytes_found = discovery.total_size;
        summary.notices = discovery.notices.iter().map(ToString::to_string).collect();

        let index = DuplicateIndex::new();
        let skipped = self.hash_all(&discovery.files, &index)?;
        summary.record_skipped(skipped);

        summary.files_hashed = index.file_count();
        summary.scan_duration = start_time.elapsed();
        log::debug!(
            "Hashed {} of {} files into {} fingerprints in {:?}",
            summary.files_hashed,
            summary.files_found,
            index.len(),
            summary.scan_duration
        );

        Ok((index, summary))
    }

    fn walk(&self, paths: &[PathBuf]) -> crate::scanner::Discovery {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_WALKING, 0);
        }

        let mut walker = Walker::new(paths.to_vec(), self.config.bounds);
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }
        if let Some(ref callback) = self.config.progress_callback {
            walker = walker.with_progress_callback(callback.clone());
        }
        let discovery = walker.discover();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_WALKING);
        }
        discovery
    }

    /// Fingerprint `files` on the worker pool, inserting into `index`.
    fn hash_all(
        &self,
        files: &[FileEntry],
        index: &DuplicateIndex,
    ) -> Result<Vec<Skipped>, FinderError> {
        if files.is_empty() {
            log::debug!("No files to hash");
            return Ok(Vec::new());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs.max(1))
            .build()?;

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_HASHING, files.len());
        }

        let processed = AtomicUsize::new(0);
        let result: Result<Vec<Option<Skipped>>, FinderError> = pool.install(|| {
            files
                .par_iter()
                .enumerate()
                .map(|(position, file)| {
                    let outcome = self.hash_one(position, file, index);
                    let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(done, file.path.to_string_lossy().as_ref());
                    }
                    outcome
                })
                .collect()
        });

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_HASHING);
        }

        Ok(result?.into_iter().flatten().collect())
    }

    fn hash_one(
        &self,
        position: usize,
        file: &FileEntry,
        index: &DuplicateIndex,
    ) -> Result<Option<Skipped>, FinderError> {
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        match self.fingerprinter.fingerprint(file) {
            Ok(fingerprint) => {
                index.insert_at(fingerprint, position, file.clone());
                Ok(None)
            }
            Err(_) if self.config.is_shutdown_requested() => Err(FinderError::Interrupted),
            Err(e) if e.is_recoverable() => {
                log::warn!("Skipping {}: {}", file.path.display(), e);
                Ok(Some(Skipped::Notice(e.to_string())))
            }
            Err(e) if self.config.skip_unreadable => {
                log::warn!("Skipping unreadable file: {}", e);
                Ok(Some(Skipped::Unreadable(e.to_string())))
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", file.path.display(), e);
                Err(FinderError::Unreadable(e))
            }
        }
    }
}
