//! Blob object
//!
//! Blobs store file content. They contain only the raw bytes, without the
//! file name (that lives in the commit manifest).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`, zlib-compressed

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Blob object holding one file snapshot
///
/// Content is kept as raw bytes so binary files survive storage unchanged.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl From<Vec<u8>> for Blob {
    fn from(content: Vec<u8>) -> Self {
        Blob::new(Bytes::from(content))
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(with_header(self.object_type(), &self.content))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::from(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_content_has_identical_id() -> anyhow::Result<()> {
        let a = Blob::from(b"hello".to_vec());
        let b = Blob::from(b"hello".to_vec());
        let c = Blob::from(b"hello!".to_vec());

        assert_eq!(a.object_id()?, b.object_id()?);
        assert_ne!(a.object_id()?, c.object_id()?);

        Ok(())
    }

    #[test]
    fn serializes_with_header() -> anyhow::Result<()> {
        let blob = Blob::from(vec![0u8, 159, 146, 150]);

        let bytes = blob.serialize()?;
        assert_eq!(&bytes[..], b"blob 4\0\x00\x9f\x92\x96");

        Ok(())
    }
}
