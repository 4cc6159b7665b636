// watch.rs - `gac watch`: long-running save-event loop.
//
// Saves are handled one at a time in arrival order, so two saves never race
// on the same repository inside this process.

use anyhow::Result;
use std::time::Duration;

use crate::activation::Host;
use crate::watcher::SaveEvents;

pub async fn execute(host: &Host) -> Result<()> {
    if host.provider.roots().is_empty() {
        return Ok(());
    }

    let debounce = Duration::from_millis(host.config.watch.debounce_ms);
    let mut events = SaveEvents::watch(host.provider.roots(), debounce)?;

    tracing::info!(
        "Waiting for saves (Ctrl-C to stop); enabled kinds are read from {}",
        host.config_path.display()
    );
    loop {
        let batch = tokio::select! {
            batch = events.next_batch() => batch,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        };
        let Some(batch) = batch else { break };

        for path in batch {
            super::dispatch(&host.coordinator, &path).await;
        }
    }

    Ok(())
}
