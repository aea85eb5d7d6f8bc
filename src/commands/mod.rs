//! Command implementations
//!
//! - `porcelain`: User-facing operations (init, add, commit, log, ...)

pub mod porcelain;
