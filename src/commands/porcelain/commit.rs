use crate::areas::repository::Repository;
use crate::artifacts::log::commit_view::CommitSummary;
use crate::artifacts::objects::commit::{Commit, Manifest};
use crate::errors::RepositoryError;
use chrono::{DateTime, FixedOffset, Local, SubsecRound};

impl Repository {
    /// Record the staged files as a new commit on top of head
    pub fn commit(&mut self, message: &str) -> anyhow::Result<CommitSummary> {
        self.commit_at(message, Local::now().fixed_offset())
    }

    /// Same as [`Repository::commit`] with an explicit timestamp
    ///
    /// The commit object is written first and head is moved by a rename; the
    /// index is rewritten last. Once head has moved the old index is stale and
    /// loads as empty, so the commit is complete even if that final write fails.
    pub fn commit_at(
        &mut self,
        message: &str,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<CommitSummary> {
        let parent = self.head()?;
        let index = self.load_index()?;

        if index.is_empty() {
            return Err(RepositoryError::NothingStaged.into());
        }

        let manifest = index
            .entries()
            .map(|entry| (entry.name.clone(), entry.oid.clone()))
            .collect::<Manifest>();

        let commit = Commit::new(
            parent,
            manifest,
            message.to_string(),
            timestamp.trunc_subsecs(0),
        );
        let commit_id = self.database().put_commit(&commit)?;
        self.refs().update_head(&commit_id)?;

        let index = self.index_mut();
        index.clear(Some(commit_id.clone()));
        if let Err(error) = index.write_updates() {
            tracing::warn!(
                error = %format!("{error:#}"),
                "commit recorded but the index could not be rewritten; it will load as empty"
            );
        }

        tracing::info!(
            oid = %commit_id,
            files = commit.manifest().len(),
            "created commit"
        );

        Ok(CommitSummary::new(commit_id, &commit))
    }
}
