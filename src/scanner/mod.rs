mod rules;

pub use rules::{GIT_DIR_NAME, RULES_FILE_NAME, RuleSet, relative_path};

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Walks a root and yields the files that the rule set does not exclude.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    rules: RuleSet,
    follow_links: bool,
}

impl DirectoryScanner {
    #[must_use]
    pub const fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            follow_links: false,
        }
    }

    #[must_use]
    pub const fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Return every tracked file under `root` as an absolute path.
    ///
    /// Excluded directories are pruned, not descended. Entries that cannot be
    /// read (permission errors, broken links) are skipped. Order is unspecified.
    #[must_use]
    pub fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let rules = self.rules.clone();
        let walk_root = root.to_path_buf();

        WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(self.follow_links)
            .filter_entry(move |entry| {
                let Ok(relative) = entry.path().strip_prefix(&walk_root) else {
                    return true;
                };
                if relative.as_os_str().is_empty() {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !rules.matches(relative, is_dir)
            })
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect()
    }
}

/// Enumerate the tracked files under `root` using `rules`.
#[must_use]
pub fn list_tracked_files(root: &Path, rules: &RuleSet) -> Vec<PathBuf> {
    DirectoryScanner::new(rules.clone()).scan(root)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
