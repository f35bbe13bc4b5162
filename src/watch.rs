//! Filesystem watcher feeding the aggregation loop.
//!
//! Every write seen on disk to a tracked file is counted and delivered as a
//! `Counted` event, followed by a `Saved` event, which is what an editor
//! would send for an explicit save. Paths outside the root or excluded by its
//! rules are dropped before they are read. Any change to the root rules file,
//! removal included, is delivered as a bare `Saved` so the loop rescans.
//! Deleted files are not forwarded; stale entries are reconciled by the next
//! full scan.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, recommended_watcher};

use crate::config::Config;
use crate::counter::LineCounter;
use crate::error::Result;
use crate::scanner::{RULES_FILE_NAME, RuleSet, relative_path};
use crate::service::Event;

/// A running watcher. Dropping it stops watching.
pub struct WorkspaceWatcher {
    watcher: Option<RecommendedWatcher>,
    forwarder: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for WorkspaceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceWatcher")
            .field("running", &self.watcher.is_some())
            .finish()
    }
}

impl WorkspaceWatcher {
    /// Watch `root` recursively, forwarding writes to `events`.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or `root`
    /// cannot be watched.
    pub fn start(root: &Path, events: Sender<Event>, config: &Config) -> Result<Self> {
        let (raw_tx, raw_rx) = unbounded::<PathBuf>();

        let mut watcher = recommended_watcher(move |result: notify::Result<notify::Event>| {
            match result {
                Ok(event) => {
                    for path in changed_paths(&event) {
                        let _ = raw_tx.send(path);
                    }
                }
                Err(e) => log::warn!("Watcher error: {e}"),
            }
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        log::info!("Watching {}", root.display());

        let mut scope = WatchScope::new(root, config);
        let debounce = Duration::from_millis(config.watch.debounce_ms);
        let forwarder = thread::Builder::new()
            .name("line-tally-watch".into())
            .spawn(move || forward(&raw_rx, &events, debounce, &mut scope))?;

        Ok(Self {
            watcher: Some(watcher),
            forwarder: Some(forwarder),
        })
    }
}

impl Drop for WorkspaceWatcher {
    fn drop(&mut self) {
        // Dropping the watcher closes the raw channel, which ends the forwarder.
        self.watcher.take();
        if let Some(forwarder) = self.forwarder.take() {
            let _ = forwarder.join();
        }
    }
}

/// Paths a notification may concern.
///
/// Metadata-only changes and accesses yield nothing. Removals and both ends of
/// a rename are reported; the forwarder decides what they mean.
#[must_use]
pub fn changed_paths(event: &notify::Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Modify(ModifyKind::Metadata(_)) | EventKind::Access(_) | EventKind::Other => {
            Vec::new()
        }
        EventKind::Any | EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
            event.paths.clone()
        }
    }
}

/// What the forwarder does with one changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delivery {
    /// The root rules file: send `Saved` only.
    Rules,
    /// A tracked file: count it, send `Counted` then `Saved`.
    Count,
    /// Outside the root or excluded: never read.
    Skip,
}

/// The forwarder's view of the root: which paths are worth reading.
///
/// Rules are reloaded whenever the rules file shows up in a batch, so
/// classification follows the same rules the loop rescans with.
#[derive(Debug)]
struct WatchScope {
    root: PathBuf,
    rules_file: PathBuf,
    rules: RuleSet,
    counter: LineCounter,
}

impl WatchScope {
    fn new(root: &Path, config: &Config) -> Self {
        Self {
            root: root.to_path_buf(),
            rules_file: root.join(RULES_FILE_NAME),
            rules: RuleSet::load(root),
            counter: LineCounter::new(config.scan.large_file_threshold),
        }
    }

    fn classify(&self, path: &Path) -> Delivery {
        if path == self.rules_file {
            return Delivery::Rules;
        }
        match relative_path(&self.root, path) {
            Some(rel) if !self.rules.excluded(&rel) => Delivery::Count,
            _ => Delivery::Skip,
        }
    }

    fn reload_rules(&mut self) {
        self.rules = RuleSet::load(&self.root);
    }

    /// Count `path` from disk; `None` for paths that are gone or not files.
    fn count(&self, path: &Path) -> Option<usize> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        Some(self.counter.count_file(path))
    }
}

fn forward(
    raw: &Receiver<PathBuf>,
    events: &Sender<Event>,
    debounce: Duration,
    scope: &mut WatchScope,
) {
    while let Ok(first) = raw.recv() {
        let mut batch = BTreeSet::from([first]);
        loop {
            match raw.recv_timeout(debounce) {
                Ok(path) => {
                    batch.insert(path);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    deliver(batch, events, scope);
                    return;
                }
            }
        }
        if !deliver(batch, events, scope) {
            return;
        }
    }
}

/// Forward one batch. Returns `false` once the loop is gone.
fn deliver(batch: BTreeSet<PathBuf>, events: &Sender<Event>, scope: &mut WatchScope) -> bool {
    if batch.contains(&scope.rules_file) {
        scope.reload_rules();
    }

    for path in batch {
        let sent = match scope.classify(&path) {
            Delivery::Skip => {
                log::trace!("Not forwarding {}", path.display());
                continue;
            }
            Delivery::Rules => events.send(Event::Saved { path }),
            Delivery::Count => {
                let Some(lines) = scope.count(&path) else {
                    continue;
                };
                events
                    .send(Event::Counted {
                        path: path.clone(),
                        lines,
                    })
                    .and_then(|()| events.send(Event::Saved { path }))
            }
        };
        if sent.is_err() {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
