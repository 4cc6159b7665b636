pub mod save;
pub mod status;
pub mod watch;

use gac_core::{AutoCommitCoordinator, SaveOutcome};
use std::path::Path;

/// Run one save through the coordinator and report the result the way a
/// host would: commits at info, provider failures at warn, skips stay quiet.
pub async fn dispatch(coordinator: &AutoCommitCoordinator, path: &Path) -> Option<SaveOutcome> {
    match coordinator.handle_save(path).await {
        Ok(outcome) => {
            if let SaveOutcome::Committed {
                message, commit_id, ..
            } = &outcome
            {
                let short = commit_id.get(..8).unwrap_or(commit_id);
                tracing::info!("{} committed as {}", message, short);
            }
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!("auto-commit of {} failed: {}", path.display(), e);
            None
        }
    }
}
