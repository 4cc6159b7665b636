//! Git provider backed by the `git` executable

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::config::SyncConfig;
use crate::error::{Result, VcsError};
use crate::porcelain::parse_status;
use crate::provider::{CommitResult, SyncResult, VcsProvider};
use crate::status::Repository;

/// Provider for one or more git working trees
///
/// Features:
/// - Workspace folders resolved to their repository top level
/// - Fresh `git status` on every `repositories()` call
/// - Single-file staging, commit, pull + push
pub struct GitProvider {
    /// Resolved path of the git executable
    git: PathBuf,

    /// Repository roots in the order they were discovered
    roots: Vec<PathBuf>,

    sync: SyncConfig,
}

impl GitProvider {
    /// Locate git and resolve every workspace folder to its repository root.
    ///
    /// Folders outside any repository are skipped. Returns
    /// `ProviderUnavailable` when no git executable is on `PATH`.
    pub async fn discover<P: AsRef<Path>>(workspaces: &[P], sync: SyncConfig) -> Result<Self> {
        let git = which::which("git").map_err(|e| {
            VcsError::ProviderUnavailable(format!("git executable not found: {}", e))
        })?;

        let mut provider = Self {
            git,
            roots: Vec::new(),
            sync,
        };

        for workspace in workspaces {
            let workspace = workspace.as_ref();
            match provider
                .git_cmd(workspace, &["rev-parse", "--show-toplevel"])
                .await
            {
                Ok(top) => {
                    let root = PathBuf::from(top);
                    if !provider.roots.contains(&root) {
                        tracing::info!("GitProvider: tracking repository {}", root.display());
                        provider.roots.push(root);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "GitProvider: {} is not inside a git repository: {}",
                        workspace.display(),
                        e
                    );
                }
            }
        }

        Ok(provider)
    }

    /// Repository roots known to this provider.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Run git in `root` and return raw stdout.
    async fn git_raw<S: AsRef<OsStr>>(&self, root: &Path, args: &[S]) -> Result<Vec<u8>> {
        let output = Command::new(&self.git)
            .args(args)
            .current_dir(root)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::CommandFailed {
                command: format!("git {}", display_args(args)),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    /// Run git in `root` and return trimmed stdout as text.
    async fn git_cmd<S: AsRef<OsStr>>(&self, root: &Path, args: &[S]) -> Result<String> {
        let stdout = self.git_raw(root, args).await?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    /// Get current branch name
    pub async fn current_branch(&self, root: &Path) -> Result<String> {
        self.git_cmd(root, &["rev-parse", "--abbrev-ref", "HEAD"])
            .await
    }

    /// Upstream of the current branch, e.g. `origin/main`.
    async fn upstream(&self, root: &Path) -> Result<String> {
        self.git_cmd(
            root,
            &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
        )
        .await
        .map_err(|_| VcsError::NoUpstream(root.to_path_buf()))
    }

    fn ensure_known(&self, root: &Path) -> Result<()> {
        if self.roots.iter().any(|r| r == root) {
            Ok(())
        } else {
            Err(VcsError::UnknownRepository(root.to_path_buf()))
        }
    }
}

#[async_trait]
impl VcsProvider for GitProvider {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        let mut repositories = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            let output = self
                .git_raw(
                    root,
                    &["status", "--porcelain=v1", "-z", "--untracked-files=all"],
                )
                .await?;
            let state = parse_status(root, &output)?;
            repositories.push(Repository::new(root.clone(), state));
        }
        Ok(repositories)
    }

    async fn stage(&self, root: &Path, paths: &[PathBuf]) -> Result<()> {
        self.ensure_known(root)?;
        tracing::info!("GitProvider: staging {} path(s) in {}", paths.len(), root.display());

        let mut args: Vec<OsString> = vec!["add".into(), "--".into()];
        args.extend(paths.iter().map(|p| p.as_os_str().to_os_string()));
        self.git_raw(root, args.as_slice()).await?;
        Ok(())
    }

    async fn commit(&self, root: &Path, message: &str) -> Result<CommitResult> {
        self.ensure_known(root)?;
        tracing::info!("GitProvider: committing in {}", root.display());

        self.git_raw(root, &["commit", "--quiet", "-m", message])
            .await?;
        let commit_id = self.git_cmd(root, &["rev-parse", "HEAD"]).await?;

        Ok(CommitResult {
            commit_id,
            message: message.to_string(),
        })
    }

    async fn sync(&self, root: &Path) -> Result<SyncResult> {
        self.ensure_known(root)?;
        let upstream = self.upstream(root).await?;

        tracing::info!("GitProvider: synchronizing {} with {}", root.display(), upstream);

        let pull = self.sync.pull_args();
        self.git_raw(root, pull.as_slice()).await?;
        self.git_raw(root, &["push"]).await?;

        Ok(SyncResult {
            root: root.to_path_buf(),
            message: format!("Synchronized with {}", upstream),
        })
    }

    fn name(&self) -> &str {
        "git"
    }
}

fn display_args<S: AsRef<OsStr>>(args: &[S]) -> String {
    args.iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;
    use std::process::Command as StdCommand;
    use tempfile::tempdir;

    fn git(dir: &Path, args: &[&str]) {
        let status = StdCommand::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {:?} failed", args);
    }

    fn init_git_repo(dir: &Path) {
        git(dir, &["init", "--quiet"]);
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);

        std::fs::write(dir.join("README.md"), "# Test\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "--quiet", "-m", "Initial commit"]);
    }

    #[tokio::test]
    async fn discover_resolves_top_level_once() {
        let dir = tempdir().unwrap();
        init_git_repo(dir.path());
        std::fs::create_dir(dir.path().join("src")).unwrap();

        let workspaces = [dir.path().to_path_buf(), dir.path().join("src")];
        let provider = GitProvider::discover(&workspaces, SyncConfig::default())
            .await
            .unwrap();

        assert_eq!(provider.roots(), &[dir.path().canonicalize().unwrap()]);
        assert_eq!(provider.name(), "git");
    }

    #[tokio::test]
    async fn discover_skips_plain_directories() {
        let dir = tempdir().unwrap();
        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();
        assert!(provider.roots().is_empty());
        assert!(provider.repositories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repositories_report_working_tree_changes() {
        let dir = tempdir().unwrap();
        init_git_repo(dir.path());
        std::fs::write(dir.path().join("README.md"), "# Changed\n").unwrap();

        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();
        let repos = provider.repositories().await.unwrap();

        assert_eq!(repos.len(), 1);
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(repos[0].root, root);
        assert!(repos[0].state.index_changes.is_empty());
        assert_eq!(repos[0].state.working_tree_changes.len(), 1);
        let change = &repos[0].state.working_tree_changes[0];
        assert_eq!(change.path, root.join("README.md"));
        assert_eq!(change.status, Status::Modified);
    }

    #[tokio::test]
    async fn stage_and_commit_single_file() {
        let dir = tempdir().unwrap();
        init_git_repo(dir.path());
        std::fs::write(dir.path().join("README.md"), "# Changed\n").unwrap();
        std::fs::write(dir.path().join("other.txt"), "untouched\n").unwrap();

        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();
        let root = provider.roots()[0].clone();

        provider
            .stage(&root, &[root.join("README.md")])
            .await
            .unwrap();
        let staged = provider.repositories().await.unwrap();
        assert_eq!(staged[0].state.index_changes.len(), 1);

        let result = provider.commit(&root, "Modified: README.md").await.unwrap();
        assert_eq!(result.commit_id.len(), 40);
        assert_eq!(result.message, "Modified: README.md");

        let after = provider.repositories().await.unwrap();
        assert!(after[0].state.index_changes.is_empty());
        let remaining: Vec<_> = after[0]
            .state
            .working_tree_changes
            .iter()
            .map(|c| (c.path.clone(), c.status))
            .collect();
        assert_eq!(remaining, vec![(root.join("other.txt"), Status::Untracked)]);
    }

    #[tokio::test]
    async fn commit_with_empty_index_fails() {
        let dir = tempdir().unwrap();
        init_git_repo(dir.path());

        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();
        let root = provider.roots()[0].clone();

        let err = provider.commit(&root, "nothing").await.unwrap_err();
        assert!(matches!(err, VcsError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_repository_is_rejected() {
        let dir = tempdir().unwrap();
        init_git_repo(dir.path());
        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();

        let err = provider
            .stage(Path::new("/not/a/repo"), &[PathBuf::from("/not/a/repo/x")])
            .await
            .unwrap_err();
        assert!(matches!(err, VcsError::UnknownRepository(_)));
    }

    #[tokio::test]
    async fn sync_without_upstream_fails() {
        let dir = tempdir().unwrap();
        init_git_repo(dir.path());
        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();
        let root = provider.roots()[0].clone();

        let err = provider.sync(&root).await.unwrap_err();
        assert!(matches!(err, VcsError::NoUpstream(_)));
    }

    #[tokio::test]
    async fn sync_pushes_to_upstream() {
        let remote = tempdir().unwrap();
        git(remote.path(), &["init", "--quiet", "--bare"]);

        let dir = tempdir().unwrap();
        init_git_repo(dir.path());
        let remote_url = remote.path().to_string_lossy().into_owned();
        git(dir.path(), &["remote", "add", "origin", &remote_url]);
        git(dir.path(), &["push", "--quiet", "-u", "origin", "HEAD"]);

        let provider = GitProvider::discover(&[dir.path()], SyncConfig::default())
            .await
            .unwrap();
        let root = provider.roots()[0].clone();

        std::fs::write(root.join("README.md"), "# Synced\n").unwrap();
        provider
            .stage(&root, &[root.join("README.md")])
            .await
            .unwrap();
        let commit = provider.commit(&root, "Modified: README.md").await.unwrap();

        let result = provider.sync(&root).await.unwrap();
        assert!(result.message.starts_with("Synchronized with origin/"));

        let branch = provider.current_branch(&root).await.unwrap();
        let remote_head = StdCommand::new("git")
            .args(["rev-parse", &branch])
            .current_dir(remote.path())
            .output()
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&remote_head.stdout).trim(),
            commit.commit_id
        );
    }
}
