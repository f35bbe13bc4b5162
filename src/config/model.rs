use serde::{Deserialize, Serialize};

use crate::counter::LARGE_FILE_THRESHOLD;

/// Default coalescing window for bursts of watcher notifications.
const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Top-level configuration, read from `.line-tally.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

/// Settings for the full scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Files at or above this size (bytes) are streamed line by line.
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: u64,

    /// Follow symbolic links while walking the tree.
    #[serde(default)]
    pub follow_links: bool,

    /// Worker threads for counting. 0 uses the rayon default.
    #[serde(default)]
    pub threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: LARGE_FILE_THRESHOLD,
            follow_links: false,
            threads: 0,
        }
    }
}

/// Settings for `watch` mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

const fn default_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
