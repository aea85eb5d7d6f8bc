//! Staging area
//!
//! The index tracks which files are staged for the next commit, each mapped
//! to the blob snapshotted at staging time.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, entry count and the base head
//! - Entries: Sorted list of staged paths with their blob ids
//! - Checksum: BLAKE3 hash of the entire index for integrity verification
//!
//! ## Staleness
//!
//! The header records which head the entries were staged on. A successful
//! commit moves head before rewriting the index, so an index whose base no
//! longer matches head belongs to a commit that already happened and loads
//! as empty.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_FIXED_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use fake::rand;
use std::collections::BTreeMap;
use std::ops::DerefMut;
use std::path::Path;

/// Staging area
///
/// Holds the staged entries in memory; `write_updates` persists them.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.minigit/index`)
    path: Box<Path>,
    /// Staged entries mapped by path
    entries: BTreeMap<String, IndexEntry>,
    /// Index file header metadata
    header: IndexHeader,
}

impl Index {
    /// Create a new empty index
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the index file (typically `.minigit/index`)
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            header: IndexHeader::empty(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Head the staged entries are recorded against
    pub fn base(&self) -> Option<&ObjectId> {
        self.header.base.as_ref()
    }

    /// Load the index from disk
    ///
    /// Reads the index file, parses the header and entries, and verifies the
    /// checksum. A missing or empty file loads as an empty index; so does a
    /// stale one (base differing from `head`).
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self, head: Option<&ObjectId>) -> anyhow::Result<()> {
        self.reset(head.cloned());

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        // an index that was never written holds no entries
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let header = Self::parse_header(&mut reader)?;
        let entries = Self::parse_entries(header.entries_count, &mut reader)?;
        reader.verify()?;

        if header.base.as_ref() != head {
            tracing::warn!(
                base = ?header.base,
                head = ?head,
                "discarding stale index left behind by a completed commit"
            );
            return Ok(());
        }

        tracing::debug!(entries = entries.len(), "loaded index");
        self.entries = entries
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();
        self.header = header;

        Ok(())
    }

    fn reset(&mut self, base: Option<ObjectId>) {
        self.entries.clear();
        self.header = IndexHeader::empty(base);
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<IndexHeader> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header)
    }

    /// Parse all entries from the index file
    ///
    /// Each entry is a fixed part followed by a path whose length the fixed
    /// part declares.
    fn parse_entries(
        entries_count: u32,
        reader: &mut Checksum,
    ) -> anyhow::Result<Vec<IndexEntry>> {
        let mut entries = Vec::with_capacity(entries_count as usize);

        for _ in 0..entries_count {
            let fixed = reader.read(ENTRY_FIXED_SIZE)?;
            let name = reader.read(IndexEntry::path_len(&fixed))?;

            let entry_bytes = [fixed.to_vec(), name.to_vec()].concat();
            entries.push(IndexEntry::deserialize(std::io::Cursor::new(entry_bytes))?);
        }

        Ok(entries)
    }

    /// Stage `entry`, replacing any previous entry for the same path
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.name.clone(), entry);

        self.header.entries_count = self.entries.len() as u32;
    }

    /// Unstage `path`, returning whether it was staged
    pub fn remove(&mut self, path: &str) -> bool {
        let removed = self.entries.remove(path).is_some();

        if removed {
            self.header.entries_count = self.entries.len() as u32;
            }

        removed
    }

    /// Drop every entry and record `base` as the head they are staged on
    pub fn clear(&mut self, base: Option<ObjectId>) {
        self.reset(base);
    }

    /// Persist the index
    ///
    /// The new content is written to a temporary file under an exclusive lock
    /// and renamed over the old index.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let index_dir = self
            .path
            .parent()
            .with_context(|| format!("Invalid index path {}", self.path.display()))?;
        let temp_index_path = index_dir.join(format!("index.tmp-{}", rand::random::<u32>()));

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_index_path)
            .with_context(|| {
                format!("Unable to open index file {}", temp_index_path.display())
            })?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        self.header = IndexHeader {
            entries_count: self.entries.len() as u32,
            ..self.header.clone()
        };
        let header_bytes = self.header.serialize()?;
        writer.write(&header_bytes)?;

        for entry in self.entries() {
            let entry_bytes = entry.serialize()?;
            writer.write(&entry_bytes)?;
        }

        writer.write_checksum()?;
        drop(writer);

        std::fs::rename(&temp_index_path, &self.path)
            .with_context(|| format!("Unable to replace index file {}", self.path.display()))?;

        tracing::debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Staged entries in path order
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
