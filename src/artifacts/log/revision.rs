//! Commit name resolution
//!
//! A commit is named either by head (no name, `HEAD` or `@`) or by a full or
//! abbreviated id. An abbreviation must match exactly one stored commit.

use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

/// Aliases naming the current head
const HEAD_ALIASES: [&str; 2] = ["HEAD", "@"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// The current head
    Head,
    /// A full id or a leading substring of one
    Prefix(String),
}

impl Revision {
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            None => Revision::Head,
            Some(name) if HEAD_ALIASES.contains(&name) => Revision::Head,
            Some(name) => Revision::Prefix(name.to_ascii_lowercase()),
        }
    }

    /// Resolve to the id of one stored commit
    ///
    /// # Errors
    ///
    /// - `NotFound` when there is no head, or nothing matches the prefix
    /// - `AmbiguousId` when several commits match the prefix
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository
                .head()?
                .ok_or_else(|| RepositoryError::not_found("commit", "HEAD").into()),
            Revision::Prefix(prefix) => Self::resolve_prefix(prefix, repository),
        }
    }

    fn resolve_prefix(prefix: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        repository.ensure_initialized()?;

        if !Self::looks_like_oid(prefix) {
            return Err(RepositoryError::not_found("commit", prefix).into());
        }

        let mut candidates = repository.database().find_commits_by_prefix(prefix)?;

        match candidates.len() {
            0 => Err(RepositoryError::not_found("commit", prefix).into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(RepositoryError::AmbiguousId {
                prefix: prefix.to_string(),
                candidates,
            }
            .into()),
        }
    }

    fn looks_like_oid(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= OBJECT_ID_LENGTH
            && name.chars().all(|c| c.is_ascii_hexdigit())
    }
}
