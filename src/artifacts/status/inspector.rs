use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
}

impl<'r> Inspector<'r> {
    fn is_content_changed(&self, path: &str, oid: &ObjectId) -> anyhow::Result<bool> {
        let blob = Blob::new(self.workspace.read_file(path)?);

        Ok(&blob.object_id()? != oid)
    }

    /// Compare the file recorded in head's manifest against the working directory
    pub fn check_head_entry_against_workspace(
        &self,
        path: &str,
        head_oid: &ObjectId,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.workspace.is_file(path) {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        if self.is_content_changed(path, head_oid)? {
            Ok(Some(WorkspaceChangeType::Modified))
        } else {
            Ok(None)
        }
    }

    pub fn check_index_against_head(
        &self,
        index_entry: &IndexEntry,
        head_manifest: &Manifest,
    ) -> IndexChangeType {
        match head_manifest.get(&index_entry.name) {
            None => IndexChangeType::Added,
            Some(head_oid) if head_oid != &index_entry.oid => IndexChangeType::Modified,
            Some(_) => IndexChangeType::Unchanged,
        }
    }
}
