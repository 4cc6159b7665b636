//! Synchronization settings for the git provider

use serde::{Deserialize, Serialize};

/// `[sync]` table of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Pull with `--rebase` instead of merging before pushing.
    #[serde(default)]
    pub rebase: bool,
}

impl SyncConfig {
    /// Arguments for the pull half of a synchronization.
    pub fn pull_args(&self) -> Vec<&'static str> {
        if self.rebase {
            vec!["pull", "--rebase"]
        } else {
            vec!["pull"]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pull_merges() {
        assert_eq!(SyncConfig::default().pull_args(), vec!["pull"]);
    }

    #[test]
    fn rebase_pull() {
        let config = SyncConfig { rebase: true };
        assert_eq!(config.pull_args(), vec!["pull", "--rebase"]);
    }
}
