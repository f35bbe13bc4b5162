mod lines;

pub use lines::{LARGE_FILE_THRESHOLD, LineCounter, count_file, count_lines};
