use serde::Serialize;

const LABEL_WIDTH: usize = 12;

/// How a working-directory file differs from head's manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceChangeType {
    Untracked,
    Modified,
    Deleted,
}

/// How a staged entry differs from head's manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexChangeType {
    Added,
    Modified,
    Unchanged,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Untracked => "",
            WorkspaceChangeType::Modified => "modified:",
            WorkspaceChangeType::Deleted => "deleted:",
        }
    }
}

impl From<&IndexChangeType> for &str {
    fn from(change: &IndexChangeType) -> Self {
        match change {
            IndexChangeType::Added => "new file:",
            IndexChangeType::Modified => "modified:",
            IndexChangeType::Unchanged => "unchanged:",
        }
    }
}

/// Status line for `path`, label padded to a common width
pub fn labelled(label: &str, path: &str) -> String {
    if label.is_empty() {
        return path.to_string();
    }
    format!("{:<width$}{}", label, path, width = LABEL_WIDTH)
}
