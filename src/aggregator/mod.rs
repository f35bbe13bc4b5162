//! Incremental aggregation of non-empty line counts for one root.
//!
//! An [`Aggregator`] owns the per-file counts and the running total. A full
//! scan rebuilds everything; content changes adjust the total by the
//! difference for one file, without touching any other.

mod scan;
mod state;

pub use scan::{ScanOutcome, ScanRequest, ScanSnapshot, ScanVersions};
pub use state::{FileEntry, PendingScan, State, Workspace, WorkspaceTotal};

use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, ConfigLoader, FileConfigLoader, ScanConfig};
use crate::counter::{count_file, count_lines};
use crate::error::{LineTallyError, Result};
use crate::scanner::{RULES_FILE_NAME, relative_path};
use crate::sink::{Status, StatusSink};

pub struct Aggregator<S: StatusSink> {
    state: State,
    sink: S,
    versions: Arc<ScanVersions>,
    config: Option<Config>,
}

impl<S: StatusSink> Aggregator<S> {
    /// Create an idle aggregator. Each root's `.line-tally.toml` is honored.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            state: State::Idle,
            sink,
            versions: Arc::new(ScanVersions::new()),
            config: None,
        }
    }

    /// Use `config` for every root instead of reading it from the root.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub const fn workspace(&self) -> Option<&Workspace> {
        match &self.state {
            State::Active(workspace) => Some(workspace),
            State::Idle | State::Counting(_) => None,
        }
    }

    /// The active (or being scanned) root.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        match &self.state {
            State::Idle => None,
            State::Counting(pending) => Some(pending.root()),
            State::Active(workspace) => Some(workspace.root()),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        match self.state {
            State::Counting(_) => Status::Counting,
            State::Idle | State::Active(_) => Status::Idle,
        }
    }

    #[must_use]
    pub const fn workspace_total(&self) -> WorkspaceTotal {
        match &self.state {
            State::Idle => WorkspaceTotal::NoWorkspace,
            State::Counting(_) => WorkspaceTotal::Counting,
            State::Active(workspace) => WorkspaceTotal::Ready(workspace.total()),
        }
    }

    /// Run a full scan of `root` to completion on the calling thread.
    ///
    /// `None` means no workspace is open: the aggregator goes idle.
    pub fn initialize(&mut self, root: Option<&Path>) {
        if let Some(request) = self.begin_scan(root) {
            self.finish_scan(request.run());
        }
    }

    /// Start a full scan of `root`, superseding any scan still in flight.
    ///
    /// The returned request does the I/O and may be run on another thread;
    /// hand its outcome to [`Self::finish_scan`]. Returns `None` when `root`
    /// is `None`, after switching to idle.
    pub fn begin_scan(&mut self, root: Option<&Path>) -> Option<ScanRequest> {
        let version = self.versions.next_version();

        let Some(root) = root else {
            self.state = State::Idle;
            self.sink.report_status(Status::Idle);
            return None;
        };
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

        let edits = match std::mem::replace(&mut self.state, State::Idle) {
            State::Counting(pending) if pending.root == root => pending.edits,
            _ => Default::default(),
        };
        let config = self.scan_config(&root);

        self.state = State::Counting(PendingScan {
            root: root.clone(),
            version,
            edits,
        });
        self.sink.report_status(Status::Counting);

        Some(ScanRequest::new(
            version,
            root,
            config,
            Arc::clone(&self.versions),
        ))
    }

    /// Apply a finished scan. Returns `false` (and changes nothing) if a newer
    /// scan has been started since, or the aggregator went idle.
    pub fn finish_scan(&mut self, outcome: ScanOutcome) -> bool {
        let is_latest = matches!(
            &self.state,
            State::Counting(pending) if pending.version == outcome.version
        );
        let Some(snapshot) = outcome.snapshot.filter(|_| is_latest) else {
            log::debug!("Ignoring result of superseded scan #{}", outcome.version);
            return false;
        };
        let State::Counting(pending) = std::mem::replace(&mut self.state, State::Idle) else {
            return false;
        };

        let mut workspace = Workspace::from_snapshot(outcome.root, snapshot);
        for (path, count) in pending.edits {
            if workspace.tracks(&path) {
                workspace.set_count(path, count);
            }
        }

        let total = workspace.total();
        self.state = State::Active(workspace);
        self.sink.report_total(total);
        self.sink.report_status(Status::Idle);
        true
    }

    /// Account for new in-memory content of `path`.
    ///
    /// Ignored when idle, when `path` is outside the root, or when it is
    /// excluded. Costs one count of `content`, regardless of workspace size.
    pub fn on_document_changed(&mut self, path: &Path, content: &str) {
        self.on_document_counted(path, count_lines(content));
    }

    /// Like [`Self::on_document_changed`], for a caller that has already
    /// counted the new content (e.g. by streaming a large file from disk).
    pub fn on_document_counted(&mut self, path: &Path, lines: usize) {
        match &mut self.state {
            State::Idle => {}
            State::Counting(pending) => {
                if relative_path(&pending.root, path).is_some() {
                    pending.edits.insert(path.to_path_buf(), lines);
                }
            }
            State::Active(workspace) => {
                if !workspace.tracks(path) {
                    log::trace!("Ignoring change to untracked {}", path.display());
                    return;
                }
                if workspace.set_count(path.to_path_buf(), lines) {
                    self.sink.report_total(workspace.total());
                }
            }
        }
    }

    /// React to a save of `path`.
    ///
    /// Saving the root's rules file starts a full rescan, returned as a request
    /// for the caller to run. Any other save needs no work: its content was
    /// already applied by the change events that preceded it.
    pub fn on_document_saved(&mut self, path: &Path) -> Option<ScanRequest> {
        let root = self.root()?;
        if path != root.join(RULES_FILE_NAME) {
            return None;
        }
        let root = root.to_path_buf();
        log::info!("Rules file saved, rescanning {}", root.display());
        self.begin_scan(Some(&root))
    }

    /// Like [`Self::on_document_saved`], running any triggered rescan inline.
    pub fn on_document_saved_blocking(&mut self, path: &Path) {
        if let Some(request) = self.on_document_saved(path) {
            self.finish_scan(request.run());
        }
    }

    fn scan_config(&self, root: &Path) -> ScanConfig {
        if let Some(config) = &self.config {
            return config.scan.clone();
        }
        match FileConfigLoader::new().load(root) {
            Ok(config) => config.scan,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                ScanConfig::default()
            }
        }
    }
}

/// The "current file" command: count the active document on disk.
///
/// # Errors
/// Returns [`LineTallyError::NoFileOpen`] when there is no active document.
pub fn current_file_count(active_document: Option<&Path>) -> Result<usize> {
    active_document
        .map(count_file)
        .ok_or(LineTallyError::NoFileOpen)
}

/// The "workspace total" command.
///
/// # Errors
/// Returns [`LineTallyError::NoWorkspace`] when no root is open.
pub fn require_workspace_total(total: WorkspaceTotal) -> Result<WorkspaceTotal> {
    match total {
        WorkspaceTotal::NoWorkspace => Err(LineTallyError::NoWorkspace),
        other => Ok(other),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
