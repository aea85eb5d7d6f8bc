//! Views of commits handed to front ends

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One line of history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub id: ObjectId,
    pub short_id: String,
    pub message: String,
    pub timestamp: DateTime<FixedOffset>,
    pub file_count: usize,
    pub parent: Option<ObjectId>,
}

impl CommitSummary {
    pub fn new(id: ObjectId, commit: &Commit) -> Self {
        CommitSummary {
            short_id: id.to_short_oid(),
            id,
            message: commit.message().to_string(),
            timestamp: commit.timestamp(),
            file_count: commit.manifest().len(),
            parent: commit.parent().cloned(),
        }
    }

    /// First line of the message
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub path: String,
    pub blob: ObjectId,
}

/// Full commit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitDetails {
    pub id: ObjectId,
    pub short_id: String,
    pub message: String,
    pub timestamp: DateTime<FixedOffset>,
    pub parent: Option<ObjectId>,
    pub files: Vec<ManifestEntry>,
}

impl CommitDetails {
    pub fn new(id: ObjectId, commit: Commit) -> Self {
        let files = commit
            .manifest()
            .iter()
            .map(|(path, blob)| ManifestEntry {
                path: path.clone(),
                blob: blob.clone(),
            })
            .collect();

        CommitDetails {
            short_id: id.to_short_oid(),
            id,
            message: commit.message().to_string(),
            timestamp: commit.timestamp(),
            parent: commit.parent().cloned(),
            files,
        }
    }
}
