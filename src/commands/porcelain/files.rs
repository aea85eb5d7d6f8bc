use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeSet;

impl Repository {
    /// Working-directory files in path order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        self.ensure_initialized()?;

        self.workspace().list_files()
    }

    pub fn read_file(&self, path: &str) -> anyhow::Result<Bytes> {
        self.ensure_initialized()?;
        let path = self.workspace().normalize(path)?;

        self.workspace().read_file(&path)
    }

    /// Write every file to the working directory, then stage them all
    ///
    /// Every name is validated before anything is written: it must be a
    /// valid path that can be created as a regular file, and no name may be a
    /// parent directory of another name in the same batch.
    pub fn write_and_stage(&mut self, files: &[(String, Bytes)]) -> anyhow::Result<Vec<String>> {
        self.ensure_initialized()?;

        let files = files
            .iter()
            .map(|(name, content)| Ok::<_, anyhow::Error>((self.workspace().normalize(name)?, content)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let names = files.iter().map(|(path, _)| path.as_str()).collect::<BTreeSet<_>>();
        for (path, _) in &files {
            self.workspace().check_writable(path)?;

            if path
                .match_indices('/')
                .any(|(position, _)| names.contains(&path[..position]))
            {
                return Err(RepositoryError::invalid_path(
                    path.as_str(),
                    "a parent is uploaded as a file in the same request",
                )
                .into());
            }
        }

        for (path, content) in &files {
            self.workspace().write_file(path, content)?;
        }

        let paths = files.into_iter().map(|(path, _)| path).collect::<Vec<_>>();
        self.add(paths.as_slice())
    }

    /// Delete a working-directory file and drop it from staging
    ///
    /// Returns whether the file was staged.
    pub fn delete_file(&mut self, path: &str) -> anyhow::Result<bool> {
        self.ensure_initialized()?;
        let path = self.workspace().normalize(path)?;

        self.workspace().remove_file(&path)?;
        tracing::debug!(path = %path, "deleted file");

        self.unstage(&path)
    }
}
