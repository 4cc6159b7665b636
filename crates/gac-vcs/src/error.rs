// error.rs - Error types for version-control provider operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading repository state or running
/// stage/commit/sync operations.
#[derive(Debug, Error)]
pub enum VcsError {
    /// No usable version-control backend was found at activation.
    #[error("version control provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A git invocation exited unsuccessfully (hooks, permissions, merge state...).
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The requested root is not one of the provider's repositories.
    #[error("unknown repository: {}", .0.display())]
    UnknownRepository(PathBuf),

    /// The current branch has nothing to synchronize with.
    #[error("branch has no upstream in {}", .0.display())]
    NoUpstream(PathBuf),

    /// Output from git could not be understood.
    #[error("unexpected status output: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VcsError>;
