//! Repository operations
//!
//! Each operation is an `impl Repository` block returning plain data; the
//! front ends decide how to present it.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage and unstage files
//! - `commit`: Create a new commit
//! - `status`: Show working tree status
//! - `log`: Show commit history
//! - `show`: Show one commit
//! - `diff`: Compare a file against head
//! - `files`: Working-directory file access for front ends

pub mod add;
pub mod commit;
pub mod diff;
pub mod files;
pub mod init;
pub mod log;
pub mod show;
pub mod status;
