use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::RepositoryError;
use std::collections::BTreeSet;

impl Repository {
    /// Snapshot the current content of `path` and stage it
    ///
    /// A blob is written even if no commit follows. Staging a path again
    /// replaces its entry.
    pub fn stage(&mut self, path: &str) -> anyhow::Result<IndexEntry> {
        self.load_index()?;

        let path = self.workspace().normalize(path)?;
        let entry = self.snapshot(&path)?;

        let index = self.index_mut();
        index.add(entry.clone());
        index.write_updates()?;

        tracing::debug!(path = %entry.name, oid = %entry.oid, "staged file");

        Ok(entry)
    }

    /// Stage files and directories, expanding directories to every file below them
    ///
    /// All paths are validated and read before the index changes, so either
    /// every file is staged or none is. `.` stands for the whole working
    /// directory.
    pub fn add(&mut self, paths: &[impl AsRef<str>]) -> anyhow::Result<Vec<String>> {
        self.load_index()?;

        let mut files = BTreeSet::new();
        for raw in paths {
            files.extend(self.expand_path(raw.as_ref())?);
        }

        let entries = files
            .iter()
            .map(|path| self.snapshot(path))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let index = self.index_mut();
        for entry in entries {
            index.add(entry);
        }
        index.write_updates()?;

        tracing::debug!(count = files.len(), "staged files");

        Ok(files.into_iter().collect())
    }

    /// Remove `path` from staging, returning whether it was staged
    ///
    /// Blobs written when it was staged are kept.
    pub fn unstage(&mut self, path: &str) -> anyhow::Result<bool> {
        self.load_index()?;

        let path = self.workspace().normalize(path)?;
        let index = self.index_mut();
        let removed = index.remove(&path);
        if removed {
            index.write_updates()?;
            tracing::debug!(path = %path, "unstaged file");
        }

        Ok(removed)
    }

    /// Staged paths in path order
    pub fn staged(&mut self) -> anyhow::Result<Vec<String>> {
        let index = self.load_index()?;

        Ok(index.entries().map(|entry| entry.name.clone()).collect())
    }

    fn snapshot(&self, path: &str) -> anyhow::Result<IndexEntry> {
        let content = self.workspace().read_file(path)?;
        let oid = self.database().put_blob(content)?;

        Ok(IndexEntry::new(path.to_string(), oid))
    }

    fn expand_path(&self, raw: &str) -> anyhow::Result<Vec<String>> {
        let workspace = self.workspace();

        if raw == "." {
            return workspace.list_files();
        }

        let path = workspace.normalize(raw)?;
        if workspace.is_dir(&path) {
            workspace.list_files_under(Some(&path))
        } else if workspace.is_file(&path) {
            Ok(vec![path])
        } else {
            Err(RepositoryError::FileNotFound(raw.to_string()).into())
        }
    }
}
