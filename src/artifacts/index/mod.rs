//! Staging index file format
//!
//! The index stores the set of paths staged for the next commit, each mapped
//! to the blob snapshotted when it was staged.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (44 bytes):
//!   - Signature: "MGIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!   - Base head: id of the head the entries were staged on (32 bytes, zeros if none)
//!
//! Entries (variable length, sorted by path):
//!   - Blob id (32 bytes)
//!   - Path length (2 bytes)
//!   - Path (UTF-8)
//!
//! Checksum (32 bytes):
//!   - BLAKE3 hash of all preceding bytes
//! ```
//!
//! All integers are stored in network byte order.

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of BLAKE3 checksum in bytes
pub const CHECKSUM_SIZE: usize = 32;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 44; // 4 marker, 4 version, 4 entries_count, 32 base head

/// Magic signature identifying index files
pub const SIGNATURE: &str = "MGIX";

/// Index file format version
pub const VERSION: u32 = 1;
