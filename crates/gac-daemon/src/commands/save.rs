// save.rs - `gac save <path>...`: host for editor write hooks.
//
// Each path is one save event. Outcomes go to stdout as JSON lines.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::activation::Host;

pub async fn execute(host: &Host, paths: &[PathBuf]) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut failures = 0usize;

    for path in paths {
        let saved = absolutize(&cwd, path);
        match super::dispatch(&host.coordinator, &saved).await {
            Some(outcome) => println!("{}", serde_json::to_string(&outcome)?),
            None => failures += 1,
        }
    }

    if failures > 0 {
        bail!("{} of {} save(s) could not be committed", failures, paths.len());
    }
    Ok(())
}

/// Absolute, symlink-free form of `path` so it compares equal to the
/// provider's paths. Deleted files resolve through their parent directory.
fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = cwd.join(path);
    if let Ok(real) = joined.canonicalize() {
        return real;
    }
    match (joined.parent(), joined.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or(joined.clone()),
        _ => joined,
    }
}
