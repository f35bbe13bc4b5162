use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} Counting [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)";

/// Progress of a full scan, drawn on stderr.
///
/// Hidden when quiet or when stderr is not a terminal. Clones share one bar,
/// so workers on the rayon pool can advance it concurrently.
#[derive(Clone)]
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    /// The file count is unknown until enumeration ends; see [`Self::set_total`].
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        if quiet || !std::io::stderr().is_terminal() {
            return Self::hidden();
        }
        let bar = ProgressBar::new(0);
        match ProgressStyle::with_template(TEMPLATE) {
            Ok(style) => bar.set_style(style.progress_chars("█▓░")),
            Err(e) => log::debug!("Default progress style: {e}"),
        }
        Self { bar }
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn set_total(&self, files: u64) {
        self.bar.set_length(files);
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl std::fmt::Debug for ScanProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanProgress")
            .field("position", &self.bar.position())
            .field("hidden", &self.bar.is_hidden())
            .finish()
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
