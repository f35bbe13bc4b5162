use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// File size threshold for streaming reads (10 MB)
pub const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Count the lines of `text` that contain at least one non-whitespace character.
///
/// `\n` and `\r\n` are both treated as line separators. A trailing separator
/// does not produce an extra line.
#[must_use]
pub fn count_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Count the non-empty lines of the file at `path`, or 0 if it cannot be read.
#[must_use]
pub fn count_file(path: &Path) -> usize {
    LineCounter::default().count_file(path)
}

/// Reads files from disk and counts their non-empty lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCounter {
    large_file_threshold: u64,
}

impl Default for LineCounter {
    fn default() -> Self {
        Self::new(LARGE_FILE_THRESHOLD)
    }
}

impl LineCounter {
    #[must_use]
    pub const fn new(large_file_threshold: u64) -> Self {
        Self {
            large_file_threshold,
        }
    }

    /// Count lines from a buffered reader (streaming, memory-efficient for large files).
    ///
    /// # Errors
    /// Returns an I/O error if reading fails or the content is not valid UTF-8.
    pub fn count_reader<R: BufRead>(reader: R) -> std::io::Result<usize> {
        let mut count = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Count the non-empty lines of the file at `path`.
    ///
    /// Anything that is not a readable regular UTF-8 file counts as 0. Special
    /// files are never opened, so a FIFO under the root cannot block a scan.
    #[must_use]
    pub fn count_file(&self, path: &Path) -> usize {
        match self.try_count_file(path) {
            Ok(count) => count,
            Err(e) => {
                log::debug!("Counting {} as 0: {e}", path.display());
                0
            }
        }
    }

    fn try_count_file(&self, path: &Path) -> std::io::Result<usize> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }

        if metadata.len() >= self.large_file_threshold {
            let file = File::open(path)?;
            Self::count_reader(BufReader::new(file))
        } else {
            let content = fs::read_to_string(path)?;
            Ok(count_lines(&content))
        }
    }
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
