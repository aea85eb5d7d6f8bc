//! Core repository components
//!
//! This module contains the storage areas of a repository:
//!
//! - `database`: Object database for storing blobs and commits
//! - `index`: Staging area tracking the files slated for the next commit
//! - `refs`: The head pointer
//! - `repository`: The handle tying the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
