// error.rs - Error types for the save-to-commit pipeline.
//
// Gate failures are not errors (see `SkipReason`). Everything here is a
// provider failure handed back to the host untouched.

use std::path::PathBuf;
use thiserror::Error;

use gac_vcs::VcsError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository state could not be read.
    #[error("failed to read repository state: {0}")]
    State(#[source] VcsError),

    /// Staging was rejected; nothing was committed.
    #[error("failed to stage {}: {source}", .path.display())]
    Stage { path: PathBuf, source: VcsError },

    /// The commit was rejected (hooks, empty index...); no sync was attempted.
    #[error("failed to commit in {}: {source}", .root.display())]
    Commit { root: PathBuf, source: VcsError },

    /// The commit succeeded but synchronization did not.
    #[error("failed to synchronize {}: {source}", .root.display())]
    Sync { root: PathBuf, source: VcsError },
}

pub type Result<T> = std::result::Result<T, CoreError>;
