//! Commit history traversal
//!
//! - `rev_list`: Lazy walk over the parent chain, newest commit first
//! - `revision`: Resolution of user-supplied commit names (head or id prefix)
//! - `commit_view`: Serializable summaries and full records handed to front ends
//!
//! History is linear: each commit has at most one parent, so the walk simply
//! follows parent pointers until it reaches the first commit.

pub mod commit_view;
pub mod rev_list;
pub mod revision;
