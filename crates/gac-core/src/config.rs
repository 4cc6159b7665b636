//! Configuration structures and sources

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use gac_vcs::SyncConfig;

use crate::classifier::ChangeKind;

/// Directory (under a workspace folder) holding the configuration file.
pub const CONFIG_DIR: &str = ".gac";

/// File name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration from .gac/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCommitConfig {
    /// Which change kinds trigger a commit
    #[serde(rename = "git-auto-commit", default)]
    pub auto_commit: EventsConfig,

    /// How commits are synchronized with the remote
    #[serde(default)]
    pub sync: SyncConfig,

    /// Filesystem watcher tuning
    #[serde(default)]
    pub watch: WatchConfig,
}

/// `[git-auto-commit]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Enabled kinds: any of "modify", "create", "delete". Empty means inert.
    #[serde(default)]
    pub events: Vec<String>,
}

/// `[watch]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Window in which repeated write events for one path collapse into one save
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

impl AutoCommitConfig {
    /// Default config location for a workspace folder.
    pub fn default_path(workspace: &Path) -> PathBuf {
        workspace.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config, returning defaults if the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Configured entries that are not a known change kind.
    pub fn unknown_events(&self) -> Vec<&str> {
        self.auto_commit
            .events
            .iter()
            .map(String::as_str)
            .filter(|e| e.parse::<ChangeKind>().is_err())
            .collect()
    }
}

/// Supplies the enabled change kinds at decision time.
///
/// Implementations must not cache: the coordinator asks once per save and
/// expects the user's current setting.
pub trait ConfigSource: Send + Sync {
    fn events(&self) -> Vec<String>;
}

impl ConfigSource for Vec<String> {
    fn events(&self) -> Vec<String> {
        self.clone()
    }
}

/// Reads `[git-auto-commit].events` from a TOML file on every call.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for FileConfigSource {
    fn events(&self) -> Vec<String> {
        let config = AutoCommitConfig::load_or_default(&self.path);
        for unknown in config.unknown_events() {
            tracing::warn!(
                "{}: '{}' is not one of modify, create, delete",
                self.path.display(),
                unknown
            );
        }
        config.auto_commit.events
    }
}
