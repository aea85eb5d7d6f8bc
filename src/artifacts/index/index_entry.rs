//! Index entry representation
//!
//! Each entry maps a repository-relative path to the blob that holds the
//! content it had when it was staged.
//!
//! ## Entry Format
//!
//! ```text
//! blob id (32 bytes) | path length (u16) | path bytes
//! ```

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use serde::Serialize;
use std::io::{BufRead, Cursor, Write};

/// Bytes preceding the path: raw id plus the path length
pub const ENTRY_FIXED_SIZE: usize = 34;

/// Longest path an entry can record
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, new)]
pub struct IndexEntry {
    /// Path relative to the repository root, `/`-separated
    pub name: String,
    /// Blob holding the staged content
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Length of the path stored after the fixed part of a serialized entry
    pub(crate) fn path_len(fixed: &[u8]) -> usize {
        byteorder::NetworkEndian::read_u16(&fixed[32..ENTRY_FIXED_SIZE]) as usize
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        if self.name.len() > MAX_PATH_SIZE {
            return Err(anyhow!("Entry path too long: {}", self.name));
        }

        let mut entry_bytes = Vec::with_capacity(ENTRY_FIXED_SIZE + self.name.len());
        self.oid.write_raw_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(self.name.len() as u16)?;
        entry_bytes.write_all(self.name.as_bytes())?;

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_FIXED_SIZE {
            return Err(anyhow!("Invalid index entry size"));
        }

        let oid = ObjectId::read_raw_from(&mut Cursor::new(&bytes[0..32]))?;
        let name_len = Self::path_len(&bytes);
        let name_bytes = bytes
            .get(ENTRY_FIXED_SIZE..ENTRY_FIXED_SIZE + name_len)
            .ok_or_else(|| anyhow!("Truncated index entry name"))?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| anyhow!("Invalid UTF-8 in entry name"))?
            .to_string();

        Ok(IndexEntry { name, oid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn oid() -> ObjectId {
        ObjectId::from_hash(*blake3::hash(b"test data").as_bytes())
    }

    #[rstest]
    #[case("a.txt")]
    #[case("nested/dir/file with spaces.md")]
    #[case("ünïcode/файл.txt")]
    fn entry_survives_serialization(oid: ObjectId, #[case] name: &str) -> anyhow::Result<()> {
        let entry = IndexEntry::new(name.to_string(), oid);

        let bytes = Packable::serialize(&entry)?;
        assert_eq!(bytes.len(), ENTRY_FIXED_SIZE + name.len());
        assert_eq!(IndexEntry::path_len(&bytes), name.len());

        let parsed = IndexEntry::deserialize(Cursor::new(bytes))?;
        assert_eq!(parsed, entry);

        Ok(())
    }

    #[rstest]
    fn truncated_entry_is_rejected(oid: ObjectId) -> anyhow::Result<()> {
        let bytes = Packable::serialize(&IndexEntry::new("abcdef".to_string(), oid))?;

        let result = IndexEntry::deserialize(Cursor::new(bytes[..bytes.len() - 2].to_vec()));
        assert!(result.is_err());

        Ok(())
    }

    #[rstest]
    fn entries_order_by_path(oid: ObjectId) {
        let a = IndexEntry::new("a/z.txt".to_string(), oid.clone());
        let b = IndexEntry::new("b.txt".to_string(), oid);

        assert!(a < b);
    }
}
