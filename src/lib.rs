//! Incremental non-empty line counting for a gitignore-aware file tree.
//!
//! [`aggregator::Aggregator`] holds the per-file counts and the running total
//! for one root. [`service::ServiceHandle`] runs it behind a channel with
//! full scans in the background, and [`watch::WorkspaceWatcher`] feeds it
//! from the filesystem.

pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod counter;
pub mod error;
pub mod output;
pub mod scanner;
pub mod service;
pub mod sink;
pub mod watch;

pub use error::{LineTallyError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
