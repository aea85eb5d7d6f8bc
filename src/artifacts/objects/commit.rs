//! Commit object
//!
//! Commits are immutable snapshot records. They contain:
//! - The parent commit ID (absent for the first commit)
//! - The creation timestamp
//! - The manifest: every staged path and the blob holding its content
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-id>
//! timestamp <rfc3339>
//! file <blob-id> <path>
//! file <blob-id> <path>
//!
//! <commit message>
//! ```
//!
//! The id of a commit is the hash of exactly these bytes, so it covers the
//! message, timestamp, manifest and parent.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Mapping from repository-relative path to blob id
pub type Manifest = BTreeMap<String, ObjectId>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Previous head, `None` for the first commit
    parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    manifest: Manifest,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        manifest: Manifest,
        message: String,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            parent,
            timestamp,
            manifest,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("timestamp {}", self.timestamp.to_rfc3339()));
        for (path, oid) in &self.manifest {
            lines.push(format!("file {} {}", oid, path));
        }

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        if let Some(path) = self.manifest.keys().find(|path| path.contains(['\n', '\r'])) {
            return Err(RepositoryError::invalid_path(path.as_str(), "contains a line break").into());
        }

        let object_content = format!("{}\n\n{}", self.header_lines().join("\n"), self.message);

        Ok(with_header(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut timestamp = None;
        let mut manifest = Manifest::new();

        for line in header.lines() {
            let (field, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line '{line}'"))?;

            match field {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "timestamp" => {
                    timestamp = Some(
                        DateTime::parse_from_rfc3339(value)
                            .context("Invalid commit object: bad timestamp")?,
                    )
                }
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed file line")?;
                    manifest.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown field '{field}'"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp")?;

        Ok(Self::new(parent, manifest, message.to_string(), timestamp))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn timestamp() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2023-01-01T12:00:00+02:00").unwrap()
    }

    fn manifest() -> Manifest {
        let mut manifest = Manifest::new();
        manifest.insert(
            "a.txt".to_string(),
            Blob::from(b"hello".to_vec()).object_id().unwrap(),
        );
        manifest.insert(
            "dir/b file.txt".to_string(),
            Blob::from(b"world".to_vec()).object_id().unwrap(),
        );
        manifest
    }

    fn reparse(commit: &Commit) -> anyhow::Result<Commit> {
        let bytes = commit.serialize()?;
        let mut reader = Cursor::new(bytes);
        let (object_type, size) = ObjectType::parse_header(&mut reader)?;
        assert_eq!(object_type, ObjectType::Commit);
        assert_eq!(size, reader.get_ref().len() - reader.position() as usize);

        Commit::deserialize(reader)
    }

    #[test]
    fn root_commit_survives_serialization() -> anyhow::Result<()> {
        let commit = Commit::new(None, manifest(), "first\n\nbody\n".to_string(), timestamp());

        assert_eq!(reparse(&commit)?, commit);

        Ok(())
    }

    #[test]
    fn child_commit_with_empty_message_survives_serialization() -> anyhow::Result<()> {
        let parent = Commit::new(None, manifest(), "first".to_string(), timestamp());
        let commit = Commit::new(
            Some(parent.object_id()?),
            Manifest::new(),
            String::new(),
            timestamp(),
        );

        let parsed = reparse(&commit)?;
        assert_eq!(parsed.parent(), Some(&parent.object_id()?));
        assert_eq!(parsed, commit);

        Ok(())
    }

    #[test]
    fn id_depends_on_every_field() -> anyhow::Result<()> {
        let base = Commit::new(None, manifest(), "m".to_string(), timestamp());
        let other_message = Commit::new(None, manifest(), "n".to_string(), timestamp());
        let other_time = Commit::new(
            None,
            manifest(),
            "m".to_string(),
            timestamp() + chrono::Duration::seconds(1),
        );
        let other_parent = Commit::new(
            Some(base.object_id()?),
            manifest(),
            "m".to_string(),
            timestamp(),
        );
        let other_manifest = Commit::new(None, Manifest::new(), "m".to_string(), timestamp());

        let id = base.object_id()?;
        for other in [other_message, other_time, other_parent, other_manifest] {
            assert_ne!(other.object_id()?, id);
        }
        assert_eq!(base.clone().object_id()?, id);

        Ok(())
    }

    #[test]
    fn paths_with_line_breaks_cannot_be_serialized() {
        let mut manifest = manifest();
        manifest.insert(
            "bad\nname.txt".to_string(),
            Blob::from(b"bad".to_vec()).object_id().unwrap(),
        );
        let commit = Commit::new(None, manifest, "m".to_string(), timestamp());

        let error = commit.serialize().unwrap_err();
        assert_eq!(
            crate::errors::ErrorKind::of(&error),
            crate::errors::ErrorKind::InvalidPath
        );
    }
}
