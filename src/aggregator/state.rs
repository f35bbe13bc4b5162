use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::{RULES_FILE_NAME, RuleSet, relative_path};

use super::scan::ScanSnapshot;

/// Aggregation state. A total only exists once a workspace is active.
#[derive(Debug)]
pub enum State {
    /// No root is open.
    Idle,
    /// A full scan of `root` is in flight.
    Counting(PendingScan),
    /// Counts are settled and maintained incrementally.
    Active(Workspace),
}

/// A scan that has been requested but whose result has not landed yet.
#[derive(Debug)]
pub struct PendingScan {
    pub(crate) root: PathBuf,
    pub(crate) version: u64,
    /// Latest counts from change events that arrived mid-scan. They are newer
    /// than anything the scan reads from disk.
    pub(crate) edits: HashMap<PathBuf, usize>,
}

impl PendingScan {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}

/// An active root with its rules, per-file counts and running total.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    rules: RuleSet,
    counts: HashMap<PathBuf, usize>,
    total: usize,
}

impl Workspace {
    pub(crate) fn from_snapshot(root: PathBuf, snapshot: ScanSnapshot) -> Self {
        Self {
            root,
            rules: snapshot.rules,
            counts: snapshot.counts,
            total: snapshot.total,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn counts(&self) -> &HashMap<PathBuf, usize> {
        &self.counts
    }

    /// Count recorded for `path`, 0 if the file has not been seen.
    #[must_use]
    pub fn count_for(&self, path: &Path) -> usize {
        self.counts.get(path).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn rules_file(&self) -> PathBuf {
        self.root.join(RULES_FILE_NAME)
    }

    /// Whether `path` is under the root and not excluded.
    #[must_use]
    pub fn tracks(&self, path: &Path) -> bool {
        relative_path(&self.root, path).is_some_and(|rel| !self.rules.excluded(&rel))
    }

    /// Record `count` for `path` and move the total by the difference.
    /// Returns whether the total changed.
    pub(crate) fn set_count(&mut self, path: PathBuf, count: usize) -> bool {
        let old = self.counts.insert(path, count).unwrap_or(0);
        self.total = self.total - old + count;
        old != count
    }

    /// Per-file counts sorted by path.
    #[must_use]
    pub fn entries(&self) -> Vec<FileEntry> {
        let mut entries: Vec<FileEntry> = self
            .counts
            .iter()
            .map(|(path, &lines)| FileEntry {
                path: relative_path(&self.root, path).unwrap_or_else(|| path.display().to_string()),
                lines,
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }
}

/// One file's count, with its path relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub lines: usize,
}

/// Answer to the "workspace total" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceTotal {
    NoWorkspace,
    Counting,
    Ready(usize),
}

impl WorkspaceTotal {
    #[must_use]
    pub const fn ready(self) -> Option<usize> {
        match self {
            Self::Ready(total) => Some(total),
            Self::NoWorkspace | Self::Counting => None,
        }
    }

    /// Text shown to the user for this answer.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::NoWorkspace => "no workspace open".to_string(),
            Self::Counting => "counting...".to_string(),
            Self::Ready(total) => format!("{total} non-empty lines"),
        }
    }
}
