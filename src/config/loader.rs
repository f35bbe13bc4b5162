use std::path::Path;

use crate::error::{LineTallyError, Result};

use super::Config;

/// Name of the optional configuration file at the workspace root.
pub const LOCAL_CONFIG_NAME: &str = ".line-tally.toml";

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load the configuration that belongs to `root`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load(&self, root: &Path) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn parse(path: &Path, content: &str) -> Result<Config> {
        toml::from_str(content)
            .map_err(|e| LineTallyError::Config(format!("{}: {e}", path.display())))
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, root: &Path) -> Result<Config> {
        let path = root.join(LOCAL_CONFIG_NAME);
        if !self.fs.exists(&path) {
            return Ok(Config::default());
        }
        self.load_from_path(&path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| LineTallyError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(path, &content)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
