// status.rs - Raw file states and the repository snapshots built from them.
//
// `Status` is a closed enumeration. Numeric codes follow the editor git
// provider's API so hosts that forward raw codes can be decoded with
// `Status::from_code`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw version-control state of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    IndexModified,
    IndexAdded,
    IndexDeleted,
    IndexRenamed,
    IndexCopied,

    Modified,
    Deleted,
    Untracked,
    Ignored,
    IntentToAdd,
    IntentToRename,
    TypeChanged,

    AddedByUs,
    AddedByThem,
    DeletedByUs,
    DeletedByThem,
    BothAdded,
    BothDeleted,
    BothModified,
}

impl Status {
    /// Every status, ordered by numeric code.
    pub const ALL: [Status; 19] = [
        Status::IndexModified,
        Status::IndexAdded,
        Status::IndexDeleted,
        Status::IndexRenamed,
        Status::IndexCopied,
        Status::Modified,
        Status::Deleted,
        Status::Untracked,
        Status::Ignored,
        Status::IntentToAdd,
        Status::IntentToRename,
        Status::TypeChanged,
        Status::AddedByUs,
        Status::AddedByThem,
        Status::DeletedByUs,
        Status::DeletedByThem,
        Status::BothAdded,
        Status::BothDeleted,
        Status::BothModified,
    ];

    /// Numeric code used by the editor git provider.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric status code. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Status> {
        Status::ALL.into_iter().find(|status| status.code() == code)
    }

    /// True for the "both sides touched" states that need human resolution.
    pub fn is_conflict(self) -> bool {
        matches!(
            self,
            Status::AddedByUs
                | Status::AddedByThem
                | Status::DeletedByUs
                | Status::DeletedByThem
                | Status::BothAdded
                | Status::BothDeleted
                | Status::BothModified
        )
    }
}

/// A single pending change reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Absolute path of the changed file.
    pub path: PathBuf,

    /// Previous path for renames and copies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<PathBuf>,

    /// Raw status code.
    pub status: Status,
}

impl Change {
    pub fn new(path: impl Into<PathBuf>, status: Status) -> Self {
        Self {
            path: path.into(),
            original_path: None,
            status,
        }
    }

    /// Attach the pre-rename path (builder pattern).
    pub fn with_original_path(mut self, original: impl Into<PathBuf>) -> Self {
        self.original_path = Some(original.into());
        self
    }
}

/// Staged, unstaged and conflicted changes of one repository.
///
/// The index and working-tree lists may name the same path: a file can be
/// partially staged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    pub index_changes: Vec<Change>,
    pub working_tree_changes: Vec<Change>,
    pub merge_changes: Vec<Change>,
}

impl RepositoryState {
    pub fn has_staged_changes(&self) -> bool {
        !self.index_changes.is_empty()
    }
}

/// Snapshot of a repository as the provider currently sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Top-level directory of the working tree.
    pub root: PathBuf,
    pub state: RepositoryState,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>, state: RepositoryState) -> Self {
        Self {
            root: root.into(),
            state,
        }
    }

    /// Path of `path` relative to this repository's root, if it lies below it.
    pub fn relative_path<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.strip_prefix(&self.root).ok()
    }
}
