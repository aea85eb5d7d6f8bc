use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create `.minigit` with empty object directories, an empty head and an
    /// empty index. Working-directory files are left alone.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized(self.path().to_path_buf()).into());
        }

        let metadata_path = self.metadata_path();
        fs::create_dir_all(&metadata_path)
            .with_context(|| format!("Failed to create {}", metadata_path.display()))?;

        self.database()
            .create_layout()
            .context("Failed to create .minigit/objects directories")?;

        self.refs()
            .create_head()
            .context("Failed to create initial HEAD")?;

        let index = self.index_mut();
        index.clear(None);
        index
            .write_updates()
            .context("Failed to create .minigit/index file")?;

        tracing::info!(path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
