//! Core VcsProvider trait and result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::status::Repository;

/// Result of a commit operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    /// Commit identifier (full hash for git)
    pub commit_id: String,

    /// Message the commit was recorded with
    pub message: String,
}

/// Result of a synchronization (pull + push)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Repository that was synchronized
    pub root: PathBuf,

    /// Human-readable summary
    pub message: String,
}

/// Pluggable access to the repositories a host knows about.
///
/// Repository state is owned by the provider. Callers ask for it again on
/// every decision instead of keeping snapshots around, and only ever change
/// it through `stage`, `commit` and `sync`.
#[async_trait]
pub trait VcsProvider: Send + Sync {
    /// Current state of every known repository, in the provider's order.
    async fn repositories(&self) -> Result<Vec<Repository>>;

    /// Mark the given absolute paths for inclusion in the next commit
    ///
    /// For git: `git add -- <paths>`
    async fn stage(&self, root: &Path, paths: &[PathBuf]) -> Result<()>;

    /// Record the staged changes of the repository at `root`
    ///
    /// For git: `git commit -m <message>`
    async fn commit(&self, root: &Path, message: &str) -> Result<CommitResult>;

    /// Reconcile the repository with its remote counterpart
    ///
    /// For git: `git pull` followed by `git push`
    async fn sync(&self, root: &Path) -> Result<SyncResult>;

    /// Provider display name (for logs and CLI output)
    fn name(&self) -> &str;
}
