//! Size bounds used to decide which files take part in a scan.

use serde::{Deserialize, Serialize};

/// Default upper bound: 1024^5 bytes (one pebibyte), effectively unbounded.
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024 * 1024 * 1024 * 1024;

/// Exclusive lower and upper size limits in bytes.
///
/// A file is accepted only when `min < size < max`. With the default
/// `min` of zero, empty files never qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    /// Exclusive lower bound in bytes
    pub min: u64,
    /// Exclusive upper bound in bytes
    pub max: u64,
}

impl SizeBounds {
    /// Create new bounds.
    #[must_use]
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Check whether `size` lies strictly between the bounds.
    #[must_use]
    pub fn accepts(&self, size: u64) -> bool {
        self.min < size && size < self.max
    }

    /// Whether any size at all can pass these bounds.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.max > self.min.saturating_add(1)
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: 0,
            max: DEFAULT_MAX_SIZE,
        }
    }
}

/// Free-function form of [`SizeBounds::accepts`].
#[must_use]
pub fn accepts(size: u64, bounds: &SizeBounds) -> bool {
    bounds.accepts(size)
}
