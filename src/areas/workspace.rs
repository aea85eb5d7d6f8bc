//! Working directory access
//!
//! Every path crossing this boundary is repository-relative, `/`-separated
//! and validated: it may not be empty, escape the working directory, point
//! into `.minigit`, or contain characters the commit format cannot record.

use crate::METADATA_DIR;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate `raw` and turn it into the canonical repository-relative form
    ///
    /// Absolute paths are accepted only when they point inside the working
    /// directory.
    pub fn normalize(&self, raw: &str) -> anyhow::Result<String> {
        if raw.contains('\n') || raw.contains('\r') {
            return Err(RepositoryError::invalid_path(raw, "contains a line break").into());
        }

        let candidate = Path::new(raw);
        let relative = if candidate.is_absolute() {
            candidate
                .strip_prefix(&self.path)
                .map_err(|_| RepositoryError::invalid_path(raw, "outside the repository"))?
        } else {
            candidate
        };

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| RepositoryError::invalid_path(raw, "not valid UTF-8"))?;
                    parts.push(part);
                }
                Component::CurDir | Component::ParentDir => {
                    return Err(RepositoryError::invalid_path(
                        raw,
                        "'.' and '..' components are not allowed",
                    )
                    .into());
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(RepositoryError::invalid_path(raw, "outside the repository").into());
                }
            }
        }

        match parts.first() {
            None => Err(RepositoryError::invalid_path(raw, "empty path").into()),
            Some(&METADATA_DIR) => {
                Err(RepositoryError::invalid_path(raw, "inside the metadata directory").into())
            }
            Some(_) => Ok(parts.join("/")),
        }
    }

    fn absolute(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }

    pub fn is_file(&self, file_path: &str) -> bool {
        self.absolute(file_path).is_file()
    }

    pub fn is_dir(&self, file_path: &str) -> bool {
        self.absolute(file_path).is_dir()
    }

    /// Read a regular file; `FileNotFound` if there is none at `file_path`
    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let path = self.absolute(file_path);

        if !path.is_file() {
            return Err(RepositoryError::FileNotFound(file_path.to_string()).into());
        }

        let content = std::fs::read(&path)
            .with_context(|| format!("Unable to read file {}", path.display()))?;

        Ok(Bytes::from(content))
    }

    /// Create or overwrite a file, creating missing parent directories
    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if path.is_dir() {
            return Err(RepositoryError::invalid_path(file_path, "is a directory").into());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Unable to write file {}", path.display()))
    }

    /// Delete a file and any directories the deletion leaves empty
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if !path.is_file() {
            return Err(RepositoryError::FileNotFound(file_path.to_string()).into());
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("Unable to remove file {}", path.display()))?;

        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir == &*self.path || std::fs::remove_dir(dir).is_err() {
                break;
            }
            parent = dir.parent();
        }

        Ok(())
    }

    /// Every regular file of the working directory, in path order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        self.list_files_under(None)
    }

    /// Every regular file below `dir_path` (or the whole working directory)
    ///
    /// Files whose names cannot be recorded (not UTF-8, or containing a line
    /// break) are skipped with a warning.
    pub fn list_files_under(&self, dir_path: Option<&str>) -> anyhow::Result<Vec<String>> {
        let root = match dir_path {
            Some(dir_path) => self.absolute(dir_path),
            None => self.path.to_path_buf(),
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(&root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR)
        {
            let entry = entry.with_context(|| format!("Unable to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            match self.to_relative(entry.path()) {
                Some(path) => files.push(path),
                None => tracing::warn!(
                    path = %entry.path().display(),
                    "skipping file whose name cannot be recorded"
                ),
            }
        }

        files.sort();
        Ok(files)
    }

    /// Fail with `InvalidPath` unless `file_path` can be created as a regular file
    ///
    /// The target may not be a directory and none of its parents may be a file.
    pub fn check_writable(&self, file_path: &str) -> anyhow::Result<()> {
        if self.is_dir(file_path) {
            return Err(RepositoryError::invalid_path(file_path, "is a directory").into());
        }

        for (position, _) in file_path.match_indices('/') {
            let parent = &file_path[..position];
            if self.absolute(parent).exists() && !self.is_dir(parent) {
                return Err(RepositoryError::invalid_path(file_path, "a parent is not a directory").into());
            }
        }

        Ok(())
    }

    fn to_relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.path).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        self.normalize(&parts.join("/")).ok()
    }
}
