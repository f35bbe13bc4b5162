use crate::aggregator::current_file_count;
use crate::cli::FileArgs;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_file(args: &FileArgs) -> i32 {
    match run_file_impl(args) {
        Ok(output) => {
            println!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Count the given file. Unreadable files count as 0.
///
/// # Errors
/// Returns [`crate::LineTallyError::NoFileOpen`] when no path was given.
pub fn run_file_impl(args: &FileArgs) -> Result<String> {
    let count = current_file_count(args.path.as_deref())?;
    Ok(count.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn file_count_is_printed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        std::fs::write(&path, "a\n\nb\n").unwrap();

        let output = run_file_impl(&FileArgs { path: Some(path) }).unwrap();
        assert_eq!(output, "2");
    }

    #[test]
    fn missing_file_counts_zero() {
        let args = FileArgs {
            path: Some(PathBuf::from("/definitely/not/here.txt")),
        };
        assert_eq!(run_file_impl(&args).unwrap(), "0");
    }

    #[test]
    fn no_path_is_no_file_open() {
        let err = run_file_impl(&FileArgs { path: None }).unwrap_err();
        assert_eq!(err.to_string(), "no file open");
        assert_eq!(run_file(&FileArgs { path: None }), EXIT_CONFIG_ERROR);
    }
}
