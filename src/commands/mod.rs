pub mod file;
pub mod init;
pub mod total;
pub mod watch;

pub use file::{run_file, run_file_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use total::{TotalReport, format_total, run_total, run_total_impl};
pub use watch::{ConsoleSink, run_watch, run_watch_impl};

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::{LineTallyError, Result};

/// Resolve `root` to an absolute, canonical directory.
///
/// # Errors
/// Returns an error if `root` does not exist.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    dunce::canonicalize(root).map_err(|source| LineTallyError::FileRead {
        path: root.to_path_buf(),
        source,
    })
}

/// Load the explicit config file if one was given, else the root's.
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<Config> {
    let loader = FileConfigLoader::new();
    match explicit {
        Some(path) => loader.load_from_path(path),
        None => loader.load(root),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
