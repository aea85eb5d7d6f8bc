use crate::areas::repository::Repository;
use crate::artifacts::log::commit_view::CommitSummary;
use crate::artifacts::log::rev_list::RevList;

/// Entries returned by `log` when no limit is given
pub const DEFAULT_LOG_LIMIT: usize = 10;

impl Repository {
    /// History from head, newest first
    ///
    /// Each call starts a fresh walk from the current head.
    pub fn history(&self) -> anyhow::Result<RevList<'_>> {
        let head = self.head()?;

        Ok(RevList::new(self.database(), head))
    }

    /// At most `limit` commit summaries, newest first
    pub fn log(&self, limit: usize) -> anyhow::Result<Vec<CommitSummary>> {
        self.history()?
            .into_iter()
            .take(limit)
            .map(|entry| entry.map(|(commit_id, commit)| CommitSummary::new(commit_id, &commit)))
            .collect()
    }
}
