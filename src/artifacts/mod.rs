//! Data structures and algorithms
//!
//! This module contains the types stored in the repository areas and the
//! algorithms working on them:
//!
//! - `core`: Shared utilities (pager wrapper)
//! - `diff`: Line diffing (Myers' diff) and unified hunks
//! - `index`: Index file format
//! - `log`: Commit history traversal and commit name resolution
//! - `objects`: Object types (blob, commit)
//! - `status`: Working tree status inspection

pub mod core;
pub mod diff;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
