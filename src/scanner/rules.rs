//! Root `.gitignore` loading and path classification.

use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Name of the rules file looked up directly under the root.
pub const RULES_FILE_NAME: &str = ".gitignore";

/// Git's own metadata directory. Never counted, regardless of rules.
pub const GIT_DIR_NAME: &str = ".git";

/// Compiled exclusion rules for one root.
#[derive(Debug, Clone)]
pub struct RuleSet {
    gitignore: Gitignore,
    pattern_count: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl RuleSet {
    /// A rule set that excludes nothing apart from `.git` and the root
    /// rules file itself.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Load `<root>/.gitignore`.
    ///
    /// A missing or unreadable rules file gives an empty rule set. Patterns
    /// that fail to compile are skipped.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let path = root.join(RULES_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(root, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::empty(),
            Err(e) => {
                log::warn!("Ignoring unreadable rules file {}: {e}", path.display());
                Self::empty()
            }
        }
    }

    /// Compile gitignore-syntax `content` for a tree rooted at `root`.
    #[must_use]
    pub fn parse(root: &Path, content: &str) -> Self {
        let source = root.join(RULES_FILE_NAME);
        let mut builder = GitignoreBuilder::new(root);

        for line in content.lines() {
            if let Err(e) = builder.add_line(Some(source.clone()), line) {
                log::warn!("Skipping invalid ignore pattern '{line}': {e}");
            }
        }

        match builder.build() {
            Ok(gitignore) => {
                let pattern_count = gitignore.len();
                Self {
                    gitignore,
                    pattern_count,
                }
            }
            Err(e) => {
                log::warn!("Failed to build ignore rules, excluding nothing: {e}");
                Self::empty()
            }
        }
    }

    /// Number of compiled patterns (comments and blank lines are not patterns).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pattern_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }

    /// Whether the file at `relative_path` (relative to the root, `/`-separated)
    /// is excluded from counting.
    ///
    /// A file is excluded when it or any of its ancestor directories is
    /// ignored. As in git, a negated pattern cannot re-include a file whose
    /// parent directory is excluded. Paths that climb out of the root with
    /// `..` are never excluded here.
    #[must_use]
    pub fn excluded(&self, relative_path: &str) -> bool {
        let components: Vec<&str> = relative_path
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect();
        if components.is_empty() || components.contains(&"..") {
            return false;
        }

        let mut current = PathBuf::new();
        let last = components.len() - 1;
        for (i, component) in components.iter().enumerate() {
            current.push(component);
            if self.matches(&current, i < last) {
                return true;
            }
        }
        false
    }

    /// Whether a single entry matches, ignoring its ancestors. Used by the
    /// walker, which prunes excluded directories before descending.
    pub(crate) fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        if is_dir && relative.file_name().is_some_and(|n| n == GIT_DIR_NAME) {
            return true;
        }
        // The root rules file configures counting; it is not counted.
        if !is_dir && relative == Path::new(RULES_FILE_NAME) {
            return true;
        }
        self.gitignore.matched(relative, is_dir).is_ignore()
    }
}

/// Render `path` relative to `root` with `/` separators.
///
/// Returns `None` unless `path` names an entry strictly below `root`. The
/// root itself and paths with `..` components are rejected, since
/// `strip_prefix` compares components lexically and `root/sub/../x` would
/// otherwise resolve somewhere the rules never saw.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Option<Vec<String>>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
