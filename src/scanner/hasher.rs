//! XXH64 file fingerprinting with streaming support.
//!
//! # Overview
//!
//! A [`Fingerprint`] is the XXH64 digest (seed 0) of a file's complete
//! content. The algorithm is chosen for speed, not collision resistance:
//! two files with the same fingerprint are treated as identical without a
//! byte-for-byte comparison.
//!
//! Files are fed to the hasher in fixed-size chunks, which yields the same
//! digest as hashing the whole content in one call while keeping memory use
//! flat for large files.
//!
//! # Example
//!
//! ```no_run
//! use xxdupe::scanner::Fingerprinter;
//! use std::path::Path;
//!
//! let fingerprinter = Fingerprinter::new();
//! let fp = fingerprinter.fingerprint_path(Path::new("some_file.bin")).unwrap();
//! println!("{fp}");
//! ```

use std::fmt;
use std::fs::File;
use std::hash::Hasher as _;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Serialize, Serializer};
use twox_hash::XxHash64;

use super::{FileEntry, HashError};

/// Size of the read buffer used while streaming file content.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Seed used for every digest, matching the reference `xxh64` default.
const SEED: u64 = 0;

/// A 64-bit XXH64 content digest.
///
/// Displays as 16 lowercase, zero-padded hexadecimal characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Wrap a raw digest value.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// The raw digest value.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Fixed-width hexadecimal rendering.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16).map(Self)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Fingerprint an in-memory buffer.
#[must_use]
pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
    let mut hasher = XxHash64::with_seed(SEED);
    hasher.write(data);
    Fingerprint(hasher.finish())
}

/// Computes content fingerprints for files.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Fingerprinter {
    /// Create a new fingerprinter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown flag, checked between read chunks.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Fingerprint a discovered file.
    ///
    /// The content read must still be `entry.size` bytes long, so that
    /// every file indexed under one fingerprint shares one size.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file can no longer be opened or read,
    /// or [`HashError::Changed`] if its length differs from the size seen
    /// at discovery.
    pub fn fingerprint(&self, entry: &FileEntry) -> Result<Fingerprint, HashError> {
        let (fingerprint, len) = self.stream(&entry.path)?;
        if len != entry.size {
            return Err(HashError::Changed {
                path: entry.path.clone(),
                expected: entry.size,
                actual: len,
            });
        }
        Ok(fingerprint)
    }

    /// Fingerprint the full content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read, or an
    /// `Interrupted` I/O error when shutdown is requested mid-read.
    pub fn fingerprint_path(&self, path: &Path) -> Result<Fingerprint, HashError> {
        self.stream(path).map(|(fingerprint, _)| fingerprint)
    }

    /// Hash the content of `path`, returning the digest and bytes read.
    fn stream(&self, path: &Path) -> Result<(Fingerprint, u64), HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = XxHash64::with_seed(SEED);
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut len = 0u64;

        loop {
            if self.is_shutdown_requested() {
                return Err(HashError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(ErrorKind::Interrupted, "Shutdown"),
                });
            }

            let read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(HashError::from_io(path, e)),
            };
            hasher.write(&buffer[..read]);
            len += read as u64;
        }

        let fingerprint = Fingerprint(hasher.finish());
        log::trace!("Fingerprint {} for {} ({} bytes)", fingerprint, path.display(), len);
        Ok((fingerprint, len))
    }
}
