use crate::areas::repository::Repository;
use crate::artifacts::log::commit_view::CommitDetails;
use crate::artifacts::log::revision::Revision;

impl Repository {
    /// Full record of head (`None`) or of the commit named by a full or
    /// abbreviated id
    pub fn show(&self, name: Option<&str>) -> anyhow::Result<CommitDetails> {
        let commit_id = Revision::parse(name).resolve(self)?;
        let commit = self.database().get_commit(&commit_id)?;

        Ok(CommitDetails::new(commit_id, commit))
    }
}
