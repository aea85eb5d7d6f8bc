use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet<T> = BTreeMap<String, T>;

/// Snapshot of the repository state
///
/// `clean` holds when nothing is staged and every file of head's manifest is
/// present with the recorded content. Untracked files are reported but do not
/// make the tree dirty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub head: Option<ObjectId>,
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub untracked: Vec<String>,
    pub total_commits: usize,
    pub clean: bool,
    pub working_directory: PathBuf,
    #[serde(skip)]
    pub(crate) index_changeset: ChangeSet<IndexChangeType>,
}

impl StatusInfo {
    /// Staged entries with how each differs from head
    pub fn index_changes(&self) -> impl Iterator<Item = (&String, &IndexChangeType)> {
        self.index_changeset.iter()
    }

    /// Head-tracked files that differ in the working directory, in path order
    pub fn workspace_changes(&self) -> Vec<(&String, WorkspaceChangeType)> {
        let mut changes = self
            .modified
            .iter()
            .map(|path| (path, WorkspaceChangeType::Modified))
            .chain(
                self.deleted
                    .iter()
                    .map(|path| (path, WorkspaceChangeType::Deleted)),
            )
            .collect::<Vec<_>>();
        changes.sort();
        changes
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    /// Compute the status of the working directory against head and `index`
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let head = self.repository.refs().read_head()?;
        let head_manifest = self.load_head_manifest(head.as_ref())?;
        let inspector = Inspector::new(self.repository.workspace());

        let mut workspace_changeset = ChangeSet::new();
        for (path, oid) in &head_manifest {
            if let Some(change) = inspector.check_head_entry_against_workspace(path, oid)? {
                workspace_changeset.insert(path.clone(), change);
            }
        }

        let index_changeset = index
            .entries()
            .map(|entry| {
                (
                    entry.name.clone(),
                    inspector.check_index_against_head(entry, &head_manifest),
                )
            })
            .collect::<ChangeSet<_>>();

        let untracked = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| !head_manifest.contains_key(path) && !index.is_staged(path))
            .collect::<BTreeSet<_>>();

        let total_commits = RevList::new(self.repository.database(), head.clone())
            .into_iter()
            .try_fold(0, |count, entry| entry.map(|_| count + 1))?;

        let paths_with = |wanted: WorkspaceChangeType| {
            workspace_changeset
                .iter()
                .filter(|(_, change)| **change == wanted)
                .map(|(path, _)| path.clone())
                .collect::<Vec<_>>()
        };
        let modified = paths_with(WorkspaceChangeType::Modified);
        let deleted = paths_with(WorkspaceChangeType::Deleted);
        let staged = index_changeset.keys().cloned().collect::<Vec<_>>();

        Ok(StatusInfo {
            clean: staged.is_empty() && modified.is_empty() && deleted.is_empty(),
            head,
            staged,
            modified,
            deleted,
            untracked: untracked.into_iter().collect(),
            total_commits,
            working_directory: self.repository.path().to_path_buf(),
            index_changeset,
        })
    }

    fn load_head_manifest(&self, head: Option<&ObjectId>) -> anyhow::Result<Manifest> {
        match head {
            Some(head) => Ok(self
                .repository
                .database()
                .get_commit(head)?
                .manifest()
                .clone()),
            None => Ok(Manifest::new()),
        }
    }
}
