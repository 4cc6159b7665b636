// classifier.rs - Collapses raw file states into the kinds of change an
// automatic single-file commit can represent.
//
// The match in `classify` has no wildcard arm. A new `Status` variant fails
// to compile here until someone decides what it means.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use gac_vcs::Status;

/// Semantic kind of a working-tree change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Modify,
    Create,
    Delete,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Modify, ChangeKind::Create, ChangeKind::Delete];

    /// Name used in the `events` configuration list.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Modify => "modify",
            ChangeKind::Create => "create",
            ChangeKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown change kind '{}'", s))
    }
}

/// Map a raw status to the change kind it represents, if any.
///
/// Renames, copies, type changes, untracked and ignored files and every
/// conflict state yield `None`: a one-line "Modified: path" commit cannot
/// summarize them.
pub fn classify(status: Status) -> Option<ChangeKind> {
    match status {
        Status::IndexModified | Status::Modified => Some(ChangeKind::Modify),
        Status::IndexAdded | Status::IntentToAdd => Some(ChangeKind::Create),
        Status::IndexDeleted | Status::Deleted => Some(ChangeKind::Delete),

        Status::IndexRenamed
        | Status::IntentToRename
        | Status::TypeChanged
        | Status::Untracked
        | Status::Ignored
        | Status::DeletedByThem
        | Status::DeletedByUs
        | Status::IndexCopied
        | Status::BothDeleted
        | Status::AddedByUs
        | Status::AddedByThem
        | Status::BothAdded
        | Status::BothModified => None,
    }
}

/// Classify a numeric status code. Codes outside the known enumeration
/// yield `None`.
pub fn classify_code(code: u8) -> Option<ChangeKind> {
    Status::from_code(code).and_then(classify)
}
