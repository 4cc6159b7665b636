// status.rs - `gac status`: the provider's view, annotated with change kinds.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use gac_core::{classify, ChangeKind};
use gac_vcs::{Change, Repository, Status, VcsProvider};

use crate::activation::Host;

#[derive(Debug, Serialize)]
struct RepositoryView {
    root: PathBuf,
    index_changes: Vec<ChangeView>,
    working_tree_changes: Vec<ChangeView>,
    merge_changes: Vec<ChangeView>,
}

#[derive(Debug, Serialize)]
struct ChangeView {
    path: PathBuf,
    status: Status,
    kind: Option<ChangeKind>,
}

impl From<&Change> for ChangeView {
    fn from(change: &Change) -> Self {
        Self {
            path: change.path.clone(),
            status: change.status,
            kind: classify(change.status),
        }
    }
}

impl From<&Repository> for RepositoryView {
    fn from(repo: &Repository) -> Self {
        let view = |changes: &[Change]| -> Vec<ChangeView> {
            changes.iter().map(ChangeView::from).collect()
        };
        Self {
            root: repo.root.clone(),
            index_changes: view(&repo.state.index_changes),
            working_tree_changes: view(&repo.state.working_tree_changes),
            merge_changes: view(&repo.state.merge_changes),
        }
    }
}

pub async fn execute(host: &Host) -> Result<()> {
    let repositories = host.provider.repositories().await?;
    let views: Vec<RepositoryView> = repositories.iter().map(RepositoryView::from).collect();
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}
