//! minigit: a small single-user version control system
//!
//! The crate is split the same way a git repository is laid out on disk:
//!
//! - `areas`: the storage areas (object database, staging index, head pointer,
//!   working directory) and the `Repository` handle that owns them
//! - `artifacts`: the data structures and algorithms living in those areas
//!   (objects, index format, diffs, history traversal, status reports)
//! - `commands`: the operations front ends call (init, add, commit, log, ...)
//! - `cli`: the `minigit` command-line front end
//! - `server`: the REST front end and its dashboard
//! - `errors`: the error kinds every operation can signal

pub mod areas;
pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod server;

/// Name of the hidden metadata directory inside the working directory
pub const METADATA_DIR: &str = ".minigit";
