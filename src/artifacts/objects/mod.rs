//! Object types and operations
//!
//! Everything stored in the object database is an object identified by the
//! BLAKE3 hash of its serialized form. There are two kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot record (message, timestamp, manifest, parent commit)
//!
//! All objects serialize to `<type> <size>\0<content>`, so identical payloads of
//! different kinds never share an id.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a BLAKE3 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;

/// Length of the abbreviated form used in human-readable output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
