//! Line-based diffing
//!
//! This module implements the diff engine:
//!
//! - `diff_algorithm`: Myers' diff for line-by-line comparison
//! - `hunk`: Grouping of an edit script into unified-diff hunks
//! - `file_diff`: Comparison of two versions of one file, rendered as a
//!   unified diff
//!
//! Everything here is pure: callers hand in the two versions and get the
//! comparison back.

pub mod diff_algorithm;
pub mod file_diff;
pub mod hunk;

/// Lines of unchanged context kept around each change
pub const HUNK_CONTEXT: usize = 3;
