//! Working tree status inspection
//!
//! Status compares three things: the staged entries, the files recorded by
//! head's manifest and the files in the working directory.
//!
//! ## Components
//!
//! - `file_change`: Enum types for categorizing changes
//! - `inspector`: Per-file comparison logic
//! - `status_info`: Status aggregation

pub mod file_change;
pub mod inspector;
pub mod status_info;
