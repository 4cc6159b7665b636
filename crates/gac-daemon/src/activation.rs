// activation.rs - One-time startup: locate git, resolve repositories and
// wire the coordinator to the configuration file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gac_core::{AutoCommitConfig, AutoCommitCoordinator, FileConfigSource};
use gac_vcs::{GitProvider, VcsError};

/// Everything a command needs after activation.
pub struct Host {
    pub provider: Arc<GitProvider>,
    pub coordinator: AutoCommitCoordinator,
    /// Startup snapshot, used for watcher and sync settings only.
    /// Enabled kinds are re-read from `config_path` on every save.
    pub config: AutoCommitConfig,
    pub config_path: PathBuf,
}

/// Activate against the given workspace folders.
///
/// Returns `None` after reporting once when no git provider is available.
pub async fn activate(workspaces: &[PathBuf], config: Option<&Path>) -> Result<Option<Host>> {
    let config_path = match config {
        Some(path) => path.to_path_buf(),
        None => AutoCommitConfig::default_path(&workspaces[0]),
    };
    let startup_config = AutoCommitConfig::load_or_default(&config_path);

    tracing::info!("Configuration: {}", config_path.display());
    if startup_config.auto_commit.events.is_empty() {
        tracing::info!("No change kinds enabled; saves will not be committed");
    }

    let provider = match GitProvider::discover(workspaces, startup_config.sync.clone()).await {
        Ok(provider) => Arc::new(provider),
        Err(e @ VcsError::ProviderUnavailable(_)) => {
            tracing::error!("{}", e);
            eprintln!("git-auto-commit: Git not found. Auto-commit is disabled.");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    if provider.roots().is_empty() {
        tracing::warn!("No git repositories found in the workspace");
    }

    let coordinator = AutoCommitCoordinator::new(
        provider.clone(),
        Box::new(FileConfigSource::new(config_path.clone())),
    );

    Ok(Some(Host {
        provider,
        coordinator,
        config: startup_config,
        config_path,
    }))
}
