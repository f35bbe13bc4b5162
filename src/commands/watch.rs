use std::io::Write;

use crate::aggregator::Aggregator;
use crate::cli::{Cli, WatchArgs};
use crate::service::ServiceHandle;
use crate::sink::{Status, StatusSink};
use crate::watch::WorkspaceWatcher;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{load_config, resolve_root};

/// Sink that prints each update on its own line.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> ConsoleSink<W> {
    #[must_use]
    pub const fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusSink for ConsoleSink<W> {
    fn report_total(&mut self, total: usize) {
        let _ = writeln!(self.out, "total: {total}");
        let _ = self.out.flush();
    }

    fn report_status(&mut self, status: Status) {
        if self.quiet {
            return;
        }
        let _ = writeln!(self.out, "status: {status}");
        let _ = self.out.flush();
    }
}

#[must_use]
pub fn run_watch(args: &WatchArgs, cli: &Cli) -> i32 {
    match run_watch_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan `args.root`, then follow filesystem changes until the process is
/// interrupted.
///
/// # Errors
/// Returns an error if the root does not exist, the configuration is invalid,
/// or the watcher cannot be started.
pub fn run_watch_impl(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let root = resolve_root(&args.root)?;
    let config = load_config(cli.config.as_deref(), &root)?;

    let sink = ConsoleSink::new(std::io::stdout(), cli.quiet);
    let service = ServiceHandle::spawn(Aggregator::new(sink).with_config(config.clone()))?;
    service.rescan(Some(root.clone()))?;

    let _watcher = WorkspaceWatcher::start(&root, service.sender(), &config)?;
    service.join();
    Ok(())
}
