use crate::areas::repository::Repository;
use crate::artifacts::diff::file_diff::FileDiff;
use bytes::Bytes;

impl Repository {
    /// Compare the working-directory content of `path` against head
    ///
    /// Files head does not track are compared against empty content.
    pub fn diff(&self, path: &str) -> anyhow::Result<FileDiff> {
        let head = self.head()?;
        let path = self.workspace().normalize(path)?;

        let current = self.workspace().read_file(&path)?;

        let baseline = match head {
            Some(head) => match self.database().get_commit(&head)?.manifest().get(&path) {
                Some(blob_id) => self.database().get_blob(blob_id)?.into_content(),
                None => Bytes::new(),
            },
            None => Bytes::new(),
        };

        Ok(FileDiff::compute(&path, &baseline, &current))
    }
}
