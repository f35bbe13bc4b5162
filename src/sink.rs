//! Where the aggregator reports totals and status.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Coarse state shown next to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Nothing is being counted: either no workspace, or the total is settled.
    Idle,
    /// A full scan is running and no usable total exists yet.
    Counting,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Counting => write!(f, "counting"),
        }
    }
}

/// Receiver of aggregate updates.
pub trait StatusSink {
    /// Called whenever the total changes or a full scan completes.
    fn report_total(&mut self, total: usize);

    /// Called when a scan starts or ends, and when no root is available.
    fn report_status(&mut self, status: Status);
}

impl<S: StatusSink + ?Sized> StatusSink for Box<S> {
    fn report_total(&mut self, total: usize) {
        (**self).report_total(total);
    }

    fn report_status(&mut self, status: Status) {
        (**self).report_status(status);
    }
}

/// Sink that writes updates to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn report_total(&mut self, total: usize) {
        log::info!("Total non-empty lines: {total}");
    }

    fn report_status(&mut self, status: Status) {
        log::info!("Status: {status}");
    }
}

/// One recorded sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Total(usize),
    Status(Status),
}

/// Sink that records every call. Clones share the same log, so one clone can
/// be handed to an aggregator on another thread while the other is inspected.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recently reported total, if any.
    #[must_use]
    pub fn last_total(&self) -> Option<usize> {
        self.reports().into_iter().rev().find_map(|r| match r {
            Report::Total(n) => Some(n),
            Report::Status(_) => None,
        })
    }

    #[must_use]
    pub fn last_status(&self) -> Option<Status> {
        self.reports().into_iter().rev().find_map(|r| match r {
            Report::Status(s) => Some(s),
            Report::Total(_) => None,
        })
    }

    pub fn clear(&self) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, report: Report) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }
}

impl StatusSink for RecordingSink {
    fn report_total(&mut self, total: usize) {
        self.push(Report::Total(total));
    }

    fn report_status(&mut self, status: Status) {
        self.push(Report::Status(status));
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
