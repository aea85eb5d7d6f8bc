use crate::METADATA_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Handle on one working directory and its `.minigit` metadata
///
/// Operations live in `commands::porcelain` as `impl Repository` blocks.
/// Nothing is cached between operations except the index, which every
/// operation that needs it reloads from disk first.
#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    index: Index,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path`, creating the directory if needed
    ///
    /// The repository does not have to be initialized yet.
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let metadata_path = path.join(METADATA_DIR);

        Ok(Repository {
            index: Index::new(metadata_path.join("index").into_boxed_path()),
            database: Database::new(metadata_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(metadata_path.into_boxed_path()),
            path: path.into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(RepositoryError::NotInitialized(self.path.to_path_buf()).into());
        }

        Ok(())
    }

    /// Current head; `NotInitialized` outside a repository
    pub fn head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.ensure_initialized()?;
        self.refs.read_head()
    }

    /// Reload the index from disk against the current head
    pub fn load_index(&mut self) -> anyhow::Result<&mut Index> {
        let head = self.head()?;
        self.index.rehydrate(head.as_ref())?;

        Ok(&mut self.index)
    }
}
