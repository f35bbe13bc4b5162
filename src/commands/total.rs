use std::fmt::Write;

use serde::Serialize;

use crate::aggregator::{Aggregator, FileEntry, Workspace};
use crate::cli::{Cli, OutputFormat, TotalArgs};
use crate::output::ScanProgress;
use crate::sink::LogSink;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, LineTallyError, Result};

use super::{load_config, resolve_root};

/// Result of a one-shot scan, as printed by `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalReport {
    pub root: String,
    pub total: usize,
    pub files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<FileEntry>>,
}

impl TotalReport {
    #[must_use]
    pub fn from_workspace(workspace: &Workspace, list: bool) -> Self {
        Self {
            root: workspace.root().display().to_string(),
            total: workspace.total(),
            files: workspace.counts().len(),
            entries: list.then(|| workspace.entries()),
        }
    }
}

#[must_use]
pub fn run_total(args: &TotalArgs, cli: &Cli) -> i32 {
    match run_total_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan `args.root` once and render the result.
///
/// # Errors
/// Returns an error if the root does not exist or the configuration is invalid.
pub fn run_total_impl(args: &TotalArgs, cli: &Cli) -> Result<String> {
    let root = resolve_root(&args.root)?;
    let config = load_config(cli.config.as_deref(), &root)?;

    let mut aggregator = Aggregator::new(LogSink).with_config(config);
    if let Some(request) = aggregator.begin_scan(Some(&root)) {
        let progress = ScanProgress::new(cli.quiet);
        aggregator.finish_scan(request.with_progress(progress).run());
    }

    let workspace = aggregator.workspace().ok_or(LineTallyError::NoWorkspace)?;
    let report = TotalReport::from_workspace(workspace, args.list);
    format_total(&report, args.format)
}

/// Render a report in the requested format.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn format_total(report: &TotalReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_text(report: &TotalReport) -> String {
    let mut output = String::new();
    if let Some(entries) = &report.entries {
        for entry in entries {
            let _ = writeln!(output, "{:>8}  {}", entry.lines, entry.path);
        }
    }
    let noun = if report.files == 1 { "file" } else { "files" };
    let _ = writeln!(
        output,
        "Total: {} non-empty lines in {} {noun}",
        report.total, report.files
    );
    output
}

#[cfg(test)]
#[path = "total_tests.rs"]
mod tests;
