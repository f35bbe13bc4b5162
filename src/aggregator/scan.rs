//! Full scans: versioned requests that can run off the aggregation thread.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::config::ScanConfig;
use crate::counter::LineCounter;
use crate::output::ScanProgress;
use crate::scanner::{DirectoryScanner, RuleSet};

/// Issues scan versions. Only the most recently issued version is current;
/// every older scan is superseded.
#[derive(Debug, Default)]
pub struct ScanVersions {
    latest: AtomicU64,
}

impl ScanVersions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a new version, superseding every earlier one.
    pub fn next_version(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_current(&self, version: u64) -> bool {
        self.latest() == version
    }
}

/// Result of a completed scan: everything a workspace is built from.
#[derive(Debug, Clone)]
pub struct ScanSnapshot {
    pub rules: RuleSet,
    pub counts: HashMap<PathBuf, usize>,
    pub total: usize,
}

/// What a scan produced. `snapshot` is `None` if the scan noticed it had
/// been superseded and stopped early.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub version: u64,
    pub root: PathBuf,
    pub snapshot: Option<ScanSnapshot>,
}

/// A full scan waiting to be run. `Send`, so it can be moved to a worker.
#[derive(Debug)]
pub struct ScanRequest {
    version: u64,
    root: PathBuf,
    config: ScanConfig,
    versions: Arc<ScanVersions>,
    progress: Option<ScanProgress>,
}

impl ScanRequest {
    pub(crate) const fn new(
        version: u64,
        root: PathBuf,
        config: ScanConfig,
        versions: Arc<ScanVersions>,
    ) -> Self {
        Self {
            version,
            root,
            config,
            versions,
            progress: None,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ScanProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_superseded(&self) -> bool {
        !self.versions.is_current(self.version)
    }

    /// Load rules, enumerate tracked files and count them all.
    ///
    /// Files are counted in parallel. Nothing is published until every count
    /// is in; a superseded scan returns an outcome without a snapshot.
    #[must_use]
    pub fn run(self) -> ScanOutcome {
        log::info!("Scanning {} (scan #{})", self.root.display(), self.version);

        let snapshot = self.collect();
        if let Some(progress) = &self.progress {
            progress.finish();
        }

        match &snapshot {
            Some(s) => log::info!(
                "Scan #{} finished: {} files, {} non-empty lines",
                self.version,
                s.counts.len(),
                s.total
            ),
            None => log::warn!("Scan #{} superseded, discarding", self.version),
        }

        ScanOutcome {
            version: self.version,
            root: self.root,
            snapshot,
        }
    }

    fn collect(&self) -> Option<ScanSnapshot> {
        let rules = RuleSet::load(&self.root);
        let files = DirectoryScanner::new(rules.clone())
            .with_follow_links(self.config.follow_links)
            .scan(&self.root);

        if self.is_superseded() {
            return None;
        }
        if let Some(progress) = &self.progress {
            progress.set_total(files.len() as u64);
        }

        let counts = self.count_all(files)?;
        let total = counts.values().sum();
        Some(ScanSnapshot {
            rules,
            counts,
            total,
        })
    }

    fn count_all(&self, files: Vec<PathBuf>) -> Option<HashMap<PathBuf, usize>> {
        let counter = LineCounter::new(self.config.large_file_threshold);
        let count = || {
            files
                .into_par_iter()
                .map(|path| {
                    if self.is_superseded() {
                        return None;
                    }
                    let lines = counter.count_file(&path);
                    if let Some(progress) = &self.progress {
                        progress.inc();
                    }
                    Some((path, lines))
                })
                .collect::<Option<HashMap<_, _>>>()
        };

        if self.config.threads == 0 {
            return count();
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
        {
            Ok(pool) => pool.install(count),
            Err(e) => {
                log::warn!("Falling back to the global thread pool: {e}");
                count()
            }
        }
    }
}
