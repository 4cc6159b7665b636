// porcelain.rs - Parser for `git status --porcelain=v1 -z` output.
//
// Each record is `XY <path>` terminated by NUL. Renames and copies are
// followed by one more NUL-terminated field holding the original path.
// Paths are relative to the repository root and are joined onto it.

use std::path::{Path, PathBuf};

use crate::error::{Result, VcsError};
use crate::status::{Change, RepositoryState, Status};

/// Parse raw porcelain output into the three change lists of a repository.
pub fn parse_status(root: &Path, output: &[u8]) -> Result<RepositoryState> {
    let mut fields = output.split(|b| *b == 0).filter(|f| !f.is_empty());
    let mut state = RepositoryState::default();

    while let Some(record) = fields.next() {
        if record.len() < 4 || record[2] != b' ' {
            return Err(VcsError::Parse(String::from_utf8_lossy(record).into_owned()));
        }
        let (x, y) = (record[0], record[1]);
        let path = root.join(path_from_bytes(&record[3..]));

        let original = if matches!(x, b'R' | b'C') || matches!(y, b'R' | b'C') {
            let from = fields.next().ok_or_else(|| {
                VcsError::Parse(format!(
                    "missing rename source for {}",
                    String::from_utf8_lossy(record)
                ))
            })?;
            Some(root.join(path_from_bytes(from)))
        } else {
            None
        };
        let change = |status: Status| {
            let change = Change::new(path.clone(), status);
            match &original {
                Some(from) => change.with_original_path(from.clone()),
                None => change,
            }
        };

        if let Some(status) = conflict_status(x, y) {
            debug_assert!(status.is_conflict());
            state.merge_changes.push(change(status));
            continue;
        }

        match (x, y) {
            (b'?', b'?') => {
                state.working_tree_changes.push(change(Status::Untracked));
                continue;
            }
            (b'!', b'!') => {
                state.working_tree_changes.push(change(Status::Ignored));
                continue;
            }
            _ => {}
        }

        let index_status = match x {
            b'M' => Some(Status::IndexModified),
            b'A' => Some(Status::IndexAdded),
            b'D' => Some(Status::IndexDeleted),
            b'R' => Some(Status::IndexRenamed),
            b'C' => Some(Status::IndexCopied),
            b'T' => Some(Status::TypeChanged),
            _ => None,
        };
        if let Some(status) = index_status {
            state.index_changes.push(change(status));
        }

        let working_tree_status = match y {
            b'M' => Some(Status::Modified),
            b'D' => Some(Status::Deleted),
            b'A' => Some(Status::IntentToAdd),
            b'R' => Some(Status::IntentToRename),
            b'T' => Some(Status::TypeChanged),
            _ => None,
        };
        if let Some(status) = working_tree_status {
            state.working_tree_changes.push(change(status));
        }
    }

    Ok(state)
}

/// Git prints paths as raw bytes; keep them byte-exact where the OS allows.
#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

fn conflict_status(x: u8, y: u8) -> Option<Status> {
    match (x, y) {
        (b'D', b'D') => Some(Status::BothDeleted),
        (b'A', b'U') => Some(Status::AddedByUs),
        (b'U', b'D') => Some(Status::DeletedByThem),
        (b'U', b'A') => Some(Status::AddedByThem),
        (b'D', b'U') => Some(Status::DeletedByUs),
        (b'A', b'A') => Some(Status::BothAdded),
        (b'U', b'U') => Some(Status::BothModified),
        _ => None,
    }
}
