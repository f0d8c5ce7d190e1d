use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use log::error;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::SyncError;

/// Creates a recursive watcher on `source` and returns a receiver for change
/// events. The watcher must be kept alive for events to be received.
///
/// Events whose paths all fall under `ignore` are dropped, so the daily
/// notes written by a sync don't wake the watcher again.
pub fn watch_notes(source: &Path, ignore: &Path) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = mpsc::channel();
    let ignore: PathBuf = ignore.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            if matches!(event.kind, EventKind::Access(_)) {
                return;
            }
            if is_relevant(&event.paths, &ignore) {
                let _ = tx.send(());
            }
        }
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(source, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", source.display()))?;

    Ok((watcher, rx))
}

fn is_relevant(paths: &[PathBuf], ignore: &Path) -> bool {
    paths.is_empty() || paths.iter().any(|p| !p.starts_with(ignore))
}

/// Blocks until a note changes or `timeout` passes. False means nothing
/// changed (or the watcher is gone).
pub fn wait_for_change(rx: &Receiver<()>, timeout: Duration) -> bool {
    rx.recv_timeout(timeout).is_ok()
}

/// Discards change events that piled up while a sync was pending.
pub fn drain_events(rx: &Receiver<()>) {
    while rx.try_recv().is_ok() {}
}

/// Run `sync` after every burst of changes on `rx`, waiting `debounce`
/// for the burst to settle. Failed syncs are logged and the loop carries on,
/// except for folder validation errors which end it. Returns `Ok` once the
/// sending side hangs up.
pub fn run_loop<F>(rx: &Receiver<()>, debounce: Duration, mut sync: F) -> Result<(), SyncError>
where
    F: FnMut() -> Result<(), SyncError>,
{
    loop {
        if !wait_for_change(rx, Duration::MAX) {
            return Ok(());
        }
        std::thread::sleep(debounce);
        drain_events(rx);

        match sync() {
            Ok(()) => {}
            Err(e) if e.is_validation() => return Err(e),
            Err(e) => error!("sync failed: {e}"),
        }
    }
}
