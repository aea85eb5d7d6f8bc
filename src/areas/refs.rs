//! Head pointer
//!
//! `.minigit/HEAD` holds the id of the most recent commit, or nothing before
//! the first commit. Moving head is the commit point of `commit`: the new
//! content is written to a temporary file and renamed over `HEAD`, so a
//! reader sees either the old head or the new one.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.minigit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    /// Create an empty `HEAD`
    pub fn create_head(&self) -> anyhow::Result<()> {
        self.write_head_content("")
    }

    /// Current head, `None` before the first commit
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("Unable to read {}", head_path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .with_context(|| format!("Corrupt head pointer in {}", head_path.display()))
    }

    /// Point head at `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_head_content(&format!("{}\n", oid))?;
        tracing::info!(head = %oid, "moved head");

        Ok(())
    }

    fn write_head_content(&self, content: &str) -> anyhow::Result<()> {
        let head_path = self.head_path();
        let temp_path = self
            .path
            .join(format!("{}.tmp-{}", HEAD_REF_NAME, rand::random::<u32>()));

        let mut head_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open {}", temp_path.display()))?;
        head_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Unable to write {}", temp_path.display()))?;
        head_file.sync_all()?;

        std::fs::rename(&temp_path, &head_path)
            .with_context(|| format!("Unable to replace {}", head_path.display()))
    }
}
