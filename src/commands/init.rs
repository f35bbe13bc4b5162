use std::fs;

use crate::cli::InitArgs;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, LineTallyError, Result};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(LineTallyError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r"# line-tally configuration file
# Exclusions come from the root .gitignore; this file only tunes how counting runs.

[scan]
# Files at or above this size (bytes) are streamed instead of read whole
large_file_threshold = 10485760

# Follow symbolic links while walking the tree
follow_links = false

# Worker threads for counting (0 = one per CPU)
threads = 0

[watch]
# Window for coalescing bursts of filesystem notifications (milliseconds)
debounce_ms = 50
"
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
