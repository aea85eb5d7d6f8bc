//! Repository error kinds
//!
//! Engine operations return `anyhow::Result` and attach context to I/O failures,
//! the same way the rest of the crate propagates errors. Conditions a caller is
//! expected to handle are raised as [`RepositoryError`] values so front ends can
//! recover the kind with [`ErrorKind::of`]. Anything else is a storage failure.

use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository already initialized in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("not a minigit repository (or it was never initialized): {}", .0.display())]
    NotInitialized(PathBuf),

    #[error("pathspec '{0}' did not match any files")]
    FileNotFound(String),

    #[error("nothing staged for commit (use \"minigit add\" to stage files)")]
    NothingStaged,

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("short id {prefix} is ambiguous{}", format_candidates(.candidates))]
    AmbiguousId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

fn format_candidates(candidates: &[ObjectId]) -> String {
    let mut message = String::from("\nhint: The candidates are:");
    for oid in candidates {
        message.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
    }
    message
}

impl RepositoryError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        RepositoryError::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::AlreadyInitialized(_) => ErrorKind::AlreadyInitialized,
            RepositoryError::NotInitialized(_) => ErrorKind::NotInitialized,
            RepositoryError::FileNotFound(_) => ErrorKind::FileNotFound,
            RepositoryError::NothingStaged => ErrorKind::NothingStaged,
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::AmbiguousId { .. } => ErrorKind::AmbiguousId,
            RepositoryError::InvalidPath { .. } => ErrorKind::InvalidPath,
        }
    }
}

/// Flat classification of every failure an operation can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AlreadyInitialized,
    NotInitialized,
    FileNotFound,
    NothingStaged,
    NotFound,
    AmbiguousId,
    InvalidPath,
    StorageFailure,
}

impl ErrorKind {
    /// Classify an error coming out of the engine.
    ///
    /// Errors that are not a [`RepositoryError`] anywhere in their chain
    /// come from the filesystem or from corrupt metadata and count as
    /// storage failures.
    pub fn of(error: &anyhow::Error) -> ErrorKind {
        error
            .downcast_ref::<RepositoryError>()
            .or_else(|| {
                error
                    .chain()
                    .find_map(|cause| cause.downcast_ref::<RepositoryError>())
            })
            .map(RepositoryError::kind)
            .unwrap_or(ErrorKind::StorageFailure)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyInitialized => "already_initialized",
            ErrorKind::NotInitialized => "not_initialized",
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::NothingStaged => "nothing_staged",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AmbiguousId => "ambiguous_id",
            ErrorKind::InvalidPath => "invalid_path",
            ErrorKind::StorageFailure => "storage_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
