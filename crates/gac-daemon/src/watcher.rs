// watcher.rs - Filesystem notifications as save events.
//
// notify reports several events per editor save (truncate, write, rename
// of a swap file...). Paths are coalesced over a debounce window and each
// distinct path is handed on once, in first-seen order.

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Keeps the OS watchers alive and yields saved paths.
pub struct SaveEvents {
    _watchers: Vec<RecommendedWatcher>,
    rx: mpsc::UnboundedReceiver<PathBuf>,
    debounce: Duration,
}

impl SaveEvents {
    /// Watch every root recursively.
    pub fn watch(roots: &[PathBuf], debounce: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watchers = Vec::with_capacity(roots.len());

        for root in roots {
            let tx = tx.clone();
            let mut watcher = RecommendedWatcher::new(
                move |res: notify::Result<Event>| match res {
                    Ok(event) => forward(&tx, saved_paths(&event)),
                    Err(e) => tracing::warn!("watch error: {}", e),
                },
                Config::default(),
            )
            .context("failed to create file watcher")?;

            watcher
                .watch(root, RecursiveMode::Recursive)
                .with_context(|| format!("failed to watch {}", root.display()))?;
            tracing::info!("Watching {}", root.display());
            watchers.push(watcher);
        }

        Ok(Self {
            _watchers: watchers,
            rx,
            debounce,
        })
    }

    /// Wait for the next burst of saves. `None` once the source is closed.
    pub async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        collect_batch(&mut self.rx, self.debounce).await
    }
}

/// Paths in `event` that look like file content being written or removed.
pub fn saved_paths(event: &Event) -> Vec<PathBuf> {
    let relevant = match &event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    if !relevant {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|p| !is_git_internal(p))
        .cloned()
        .collect()
}

fn is_git_internal(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == ".git"))
}

/// Hand paths to the batcher. Stops at the first failed send: the receiver
/// only goes away when the daemon is shutting down.
fn forward(tx: &mpsc::UnboundedSender<PathBuf>, paths: Vec<PathBuf>) {
    for path in paths {
        if tx.send(path).is_err() {
            tracing::debug!("save event receiver closed, dropping events");
            return;
        }
    }
}

/// A batch is flushed after at most this many debounce windows, even while
/// events keep arriving.
pub const MAX_BATCH_WINDOWS: u32 = 10;

/// Block for one path, then keep reading until `debounce` passes quietly or
/// [`MAX_BATCH_WINDOWS`] windows have elapsed since the first path.
pub async fn collect_batch(
    rx: &mut mpsc::UnboundedReceiver<PathBuf>,
    debounce: Duration,
) -> Option<Vec<PathBuf>> {
    let first = rx.recv().await?;
    let deadline = Instant::now() + debounce * MAX_BATCH_WINDOWS;
    let mut seen = HashSet::from([first.clone()]);
    let mut batch = vec![first];

    loop {
        let quiet_until = (Instant::now() + debounce).min(deadline);
        match tokio::time::timeout_at(quiet_until, rx.recv()).await {
            Ok(Some(path)) => {
                if seen.insert(path.clone()) {
                    batch.push(path);
                }
            }
            Ok(None) | Err(_) => break,
        }
    }

    Some(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |e, p| e.add_path(PathBuf::from(p)))
    }

    #[test]
    fn content_events_are_saves() {
        let write = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/repo/a.rs"],
        );
        let create = event(EventKind::Create(CreateKind::File), &["/repo/b.rs"]);
        let remove = event(EventKind::Remove(RemoveKind::File), &["/repo/c.rs"]);

        assert_eq!(saved_paths(&write), vec![PathBuf::from("/repo/a.rs")]);
        assert_eq!(saved_paths(&create), vec![PathBuf::from("/repo/b.rs")]);
        assert_eq!(saved_paths(&remove), vec![PathBuf::from("/repo/c.rs")]);
    }

    #[test]
    fn metadata_and_access_are_ignored() {
        let chmod = event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
            &["/repo/a.rs"],
        );
        let read = event(EventKind::Access(AccessKind::Any), &["/repo/a.rs"]);
        assert!(saved_paths(&chmod).is_empty());
        assert!(saved_paths(&read).is_empty());
    }

    #[test]
    fn git_directory_is_ignored() {
        let e = event(
            EventKind::Modify(ModifyKind::Any),
            &["/repo/.git/index", "/repo/.gitignore", "/repo/src/lib.rs"],
        );
        assert_eq!(
            saved_paths(&e),
            vec![PathBuf::from("/repo/.gitignore"), PathBuf::from("/repo/src/lib.rs")]
        );
    }

    #[tokio::test]
    async fn batch_coalesces_duplicates_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for p in ["/r/a", "/r/b", "/r/a", "/r/c", "/r/b"] {
            tx.send(PathBuf::from(p)).unwrap();
        }

        let batch = collect_batch(&mut rx, Duration::from_millis(20)).await.unwrap();
        assert_eq!(
            batch,
            vec![PathBuf::from("/r/a"), PathBuf::from("/r/b"), PathBuf::from("/r/c")]
        );
    }

    #[tokio::test]
    async fn closed_source_ends_batches() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();
        tx.send(PathBuf::from("/r/a")).unwrap();
        drop(tx);

        assert_eq!(
            collect_batch(&mut rx, Duration::from_millis(20)).await,
            Some(vec![PathBuf::from("/r/a")])
        );
        assert_eq!(collect_batch(&mut rx, Duration::from_millis(20)).await, None);
    }

    #[tokio::test]
    async fn steady_stream_still_flushes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(async move {
            let mut n = 0u32;
            while tx.send(PathBuf::from(format!("/r/{}", n % 3))).is_ok() {
                n += 1;
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        });

        let debounce = Duration::from_millis(50);
        let batch = tokio::time::timeout(
            debounce * MAX_BATCH_WINDOWS * 4,
            collect_batch(&mut rx, debounce),
        )
        .await
        .expect("batch never flushed under a steady stream")
        .unwrap();
        assert_eq!(
            batch,
            vec![PathBuf::from("/r/0"), PathBuf::from("/r/1"), PathBuf::from("/r/2")]
        );

        drop(rx);
        writer.await.unwrap();
    }

    #[test]
    fn forward_stops_quietly_once_receiver_is_gone() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        forward(&tx, vec![PathBuf::from("/r/a"), PathBuf::from("/r/b")]);
        assert_eq!(rx.try_recv().unwrap(), PathBuf::from("/r/a"));
        assert_eq!(rx.try_recv().unwrap(), PathBuf::from("/r/b"));

        drop(rx);
        forward(&tx, vec![PathBuf::from("/r/c"), PathBuf::from("/r/d")]);
        assert!(tx.is_closed());
    }
}
