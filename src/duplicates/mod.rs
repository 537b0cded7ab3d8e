//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Aggregating fingerprints into a concurrent index
//! - Duplicate group management
//! - Orchestrating discovery and parallel hashing

pub mod finder;
pub mod groups;
pub mod index;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::DuplicateGroup;
pub use index::DuplicateIndex;
