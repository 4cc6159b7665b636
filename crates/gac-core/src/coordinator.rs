// coordinator.rs - Turns one save event into at most one stage → commit → sync.
//
// Each invocation reads repository state from the provider, runs the gates
// in order and returns to idle. Nothing is carried between invocations.
// Provider failures during execution are returned, never retried.

use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use gac_vcs::{Change, Repository, Status, VcsProvider};

use crate::classifier::{classify, ChangeKind};
use crate::config::ConfigSource;
use crate::error::{CoreError, Result};

/// Why a save did not lead to a commit. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Some repository already has staged work we did not put there.
    StagedChangesPresent,
    /// No unstaged change has the saved path.
    NoMatchingChange,
    /// The change is a rename, conflict, untracked file, etc.
    Unclassified(Status),
    /// The change kind is not listed in the configuration.
    KindNotEnabled(ChangeKind),
}

/// Result of handling one save event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Skipped(SkipReason),
    Committed {
        root: PathBuf,
        path: PathBuf,
        kind: ChangeKind,
        message: String,
        commit_id: String,
    },
}

impl SaveOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SaveOutcome::Committed { .. })
    }
}

/// Orchestrates the gate checks and the provider calls for save events.
pub struct AutoCommitCoordinator {
    provider: Arc<dyn VcsProvider>,
    config: Box<dyn ConfigSource>,
}

impl AutoCommitCoordinator {
    pub fn new(provider: Arc<dyn VcsProvider>, config: Box<dyn ConfigSource>) -> Self {
        Self { provider, config }
    }

    /// Handle the save of the document at `saved` (absolute path).
    pub async fn handle_save(&self, saved: &Path) -> Result<SaveOutcome> {
        let repositories = self
            .provider
            .repositories()
            .await
            .map_err(CoreError::State)?;

        if repositories.iter().any(|r| r.state.has_staged_changes()) {
            return Ok(skip(saved, SkipReason::StagedChangesPresent));
        }

        let Some((repo, change)) = find_change(&repositories, saved) else {
            return Ok(skip(saved, SkipReason::NoMatchingChange));
        };

        let Some(kind) = classify(change.status) else {
            return Ok(skip(saved, SkipReason::Unclassified(change.status)));
        };

        if !self.config.events().iter().any(|e| e == kind.as_str()) {
            return Ok(skip(saved, SkipReason::KindNotEnabled(kind)));
        }

        let root = repo.root.clone();
        let path = change.path.clone();
        let message = commit_message(repo, &path);

        tracing::info!(
            provider = self.provider.name(),
            kind = %kind,
            "auto-committing {}",
            path.display()
        );

        self.provider
            .stage(&root, std::slice::from_ref(&path))
            .await
            .map_err(|source| CoreError::Stage {
                path: path.clone(),
                source,
            })?;

        let commit = self
            .provider
            .commit(&root, &message)
            .await
            .map_err(|source| CoreError::Commit {
                root: root.clone(),
                source,
            })?;

        self.provider
            .sync(&root)
            .await
            .map_err(|source| CoreError::Sync {
                root: root.clone(),
                source,
            })?;

        Ok(SaveOutcome::Committed {
            root,
            path,
            kind,
            message,
            commit_id: commit.commit_id,
        })
    }
}

fn skip(saved: &Path, reason: SkipReason) -> SaveOutcome {
    tracing::debug!("no auto-commit for {}: {:?}", saved.display(), reason);
    SaveOutcome::Skipped(reason)
}

/// Find the unstaged change whose path equals `saved`.
///
/// Paths are compared exactly. If several repositories or changes match,
/// the last one in iteration order wins.
pub fn find_change<'a>(
    repositories: &'a [Repository],
    saved: &Path,
) -> Option<(&'a Repository, &'a Change)> {
    let mut found = None;
    for repo in repositories {
        for change in &repo.state.working_tree_changes {
            if change.path == saved {
                found = Some((repo, change));
            }
        }
    }
    found
}

/// `Modified: <path relative to the repository root>`, always with `/`
/// separators.
///
/// A path outside the root is used as given.
pub fn commit_message(repo: &Repository, path: &Path) -> String {
    let relative = match repo.relative_path(path) {
        Some(rel) => rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        None => path.display().to_string(),
    };
    format!("Modified: {}", relative)
}
