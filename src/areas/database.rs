//! Object database
//!
//! Content-addressed storage for blobs and commits under `.minigit/objects`.
//! Each kind lives in its own directory, fanned out by the first two hex
//! characters of the id. Object files are zlib-compressed and written through
//! a temporary file renamed into place, so a reader never sees a partial
//! object.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the per-kind object directories
    pub fn create_layout(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let dir = self.kind_path(object_type);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;
        }

        Ok(())
    }

    /// Store `content` as a blob, returning its id
    pub fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;

        Blob::deserialize(object_reader)
    }

    /// Store `commit`, returning its id
    pub fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit)
    }

    pub fn get_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;

        Commit::deserialize(object_reader)
            .with_context(|| format!("Corrupt commit object {}", object_id))
    }

    /// Write `object` unless an object with the same id already exists
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir)
            .with_context(|| format!("Unable to create object directory {}", object_dir.display()))?;

        self.write_object(&object_path, object.serialize()?)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Every stored commit id, newest commit first
    ///
    /// Commits with equal timestamps are ordered by id.
    pub fn list_commit_ids_newest_first(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commits = self
            .find_commits_by_prefix("")?
            .into_iter()
            .map(|oid| {
                let timestamp = self.get_commit(&oid)?.timestamp();
                Ok::<_, anyhow::Error>((timestamp, oid))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        commits.sort_by(|(a_time, a_oid), (b_time, b_oid)| {
            b_time.cmp(a_time).then_with(|| a_oid.cmp(b_oid))
        });

        Ok(commits.into_iter().map(|(_, oid)| oid).collect())
    }

    /// Find all commits whose id starts with the given prefix.
    ///
    /// Used to resolve abbreviated ids to their full form.
    ///
    /// # Arguments
    ///
    /// * `prefix` - A lowercase hexadecimal string prefix (e.g., "abc", "a1b2c3")
    ///
    /// # Returns
    ///
    /// All matching ids in ascending order. More than one match means the
    /// prefix is ambiguous.
    ///
    /// # Performance
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For prefixes of 0-1 characters, must search all directories (slower)
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.kind_path(ObjectType::Commit);
        let mut matches = Vec::new();

        let dirs = if prefix.len() >= 2 {
            vec![commits_path.join(&prefix[..2])]
        } else {
            Self::list_dir(&commits_path)?
        };

        for dir_path in dirs.into_iter().filter(|dir| dir.is_dir()) {
            let Some(dir_name) = dir_path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            for file_path in Self::list_dir(&dir_path)? {
                let Some(file_name) = file_path.file_name().and_then(|name| name.to_str()) else {
                    continue;
                };

                let full_oid = format!("{}{}", dir_name, file_name);
                if !full_oid.starts_with(prefix) {
                    continue;
                }
                // temporary files and strays are not objects
                if let Ok(oid) = ObjectId::try_parse(full_oid) {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn kind_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.directory())
    }

    fn list_dir(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        if !path.is_dir() {
            return Ok(vec![]);
        }

        std::fs::read_dir(path)
            .with_context(|| format!("Unable to list directory {}", path.display()))?
            .map(|entry| Ok::<_, anyhow::Error>(entry?.path()))
            .collect()
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.kind_path(expected_type).join(object_id.to_path());
        if !object_path.exists() {
            return Err(RepositoryError::not_found(expected_type.as_str(), object_id.as_ref()).into());
        }

        let object_content = self.read_object(&object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {}, expected a {}",
                object_id,
                object_type,
                expected_type
            );
        }

        let remaining = object_reader.get_ref().len() - object_reader.position() as usize;
        if remaining != size {
            anyhow::bail!(
                "Object {} is truncated: expected {} bytes, found {}",
                object_id,
                size,
                remaining
            );
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)
            .with_context(|| format!("Unable to rename object file to {}", object_path.display()))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
