//! Event loop that owns an [`Aggregator`] and keeps full scans off it.
//!
//! Events arrive one at a time over a channel, so the aggregator is only ever
//! touched from the loop thread. Full scans run on the rayon pool and post
//! their outcome back to the loop; outcomes from superseded scans are dropped
//! there.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, select, unbounded};

use crate::aggregator::{Aggregator, ScanOutcome, ScanRequest, WorkspaceTotal};
use crate::error::{LineTallyError, Result};
use crate::sink::StatusSink;

/// How often [`ServiceHandle::settled_total`] polls the loop.
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Input to the aggregation loop.
#[derive(Debug)]
pub enum Event {
    /// In-memory content of a document changed.
    Changed { path: PathBuf, content: String },
    /// A document changed and its new content has already been counted.
    Counted { path: PathBuf, lines: usize },
    /// A document was saved.
    Saved { path: PathBuf },
    /// Rescan `root` from scratch, or go idle for `None`.
    Rescan { root: Option<PathBuf> },
    /// Ask for the current workspace total.
    Query(Sender<WorkspaceTotal>),
    /// Stop the loop.
    Shutdown,
}

/// Owning handle to a running aggregation loop.
///
/// Dropping the handle stops the loop and waits for it to exit.
#[derive(Debug)]
pub struct ServiceHandle {
    events: Sender<Event>,
    worker: Option<JoinHandle<()>>,
}

impl ServiceHandle {
    /// Start the loop on its own thread.
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn<S>(aggregator: Aggregator<S>) -> Result<Self>
    where
        S: StatusSink + Send + 'static,
    {
        let (events, receiver) = unbounded();
        let worker = thread::Builder::new()
            .name("line-tally-aggregator".into())
            .spawn(move || EventLoop::new(aggregator).run(&receiver))?;

        Ok(Self {
            events,
            worker: Some(worker),
        })
    }

    /// A sender for event sources such as a filesystem watcher.
    #[must_use]
    pub fn sender(&self) -> Sender<Event> {
        self.events.clone()
    }

    /// # Errors
    /// Returns [`LineTallyError::ServiceStopped`] if the loop has exited.
    pub fn changed(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> Result<()> {
        self.send(Event::Changed {
            path: path.into(),
            content: content.into(),
        })
    }

    /// # Errors
    /// Returns [`LineTallyError::ServiceStopped`] if the loop has exited.
    pub fn saved(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(Event::Saved { path: path.into() })
    }

    /// # Errors
    /// Returns [`LineTallyError::ServiceStopped`] if the loop has exited.
    pub fn rescan(&self, root: Option<PathBuf>) -> Result<()> {
        self.send(Event::Rescan { root })
    }

    /// Current workspace total, as seen by the loop after all earlier events.
    ///
    /// # Errors
    /// Returns [`LineTallyError::ServiceStopped`] if the loop has exited.
    pub fn workspace_total(&self) -> Result<WorkspaceTotal> {
        let (reply, answer) = unbounded();
        self.send(Event::Query(reply))?;
        answer.recv().map_err(|_| LineTallyError::ServiceStopped)
    }

    /// Wait until no scan is in flight, then return the total.
    ///
    /// Gives up after `timeout` and returns whatever the loop reports then.
    ///
    /// # Errors
    /// Returns [`LineTallyError::ServiceStopped`] if the loop has exited.
    pub fn settled_total(&self, timeout: Duration) -> Result<WorkspaceTotal> {
        let deadline = Instant::now() + timeout;
        loop {
            let total = self.workspace_total()?;
            if total != WorkspaceTotal::Counting || Instant::now() >= deadline {
                return Ok(total);
            }
            thread::sleep(SETTLE_POLL_INTERVAL);
        }
    }

    /// Wait for the loop to exit on its own, i.e. until a `Shutdown` arrives
    /// through a [`Self::sender`] clone.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::error!("Aggregation loop panicked");
        }
    }

    /// Stop the loop and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn send(&self, event: Event) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| LineTallyError::ServiceStopped)
    }

    fn stop(&mut self) {
        let _ = self.events.send(Event::Shutdown);
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::error!("Aggregation loop panicked");
        }
    }
}

impl Drop for ServiceHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

struct EventLoop<S: StatusSink> {
    aggregator: Aggregator<S>,
    outcomes: Sender<ScanOutcome>,
    finished: Receiver<ScanOutcome>,
}

impl<S: StatusSink> EventLoop<S> {
    fn new(aggregator: Aggregator<S>) -> Self {
        let (outcomes, finished) = unbounded();
        Self {
            aggregator,
            outcomes,
            finished,
        }
    }

    fn run(mut self, events: &Receiver<Event>) {
        let finished = self.finished.clone();
        loop {
            select! {
                recv(events) -> event => match event {
                    Ok(Event::Shutdown) | Err(_) => break,
                    Ok(event) => self.handle(event),
                },
                recv(finished) -> outcome => {
                    if let Ok(outcome) = outcome {
                        self.aggregator.finish_scan(outcome);
                    }
                }
            }
        }
        log::debug!("Aggregation loop stopped");
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Changed { path, content } => {
                self.aggregator.on_document_changed(&path, &content);
            }
            Event::Counted { path, lines } => {
                self.aggregator.on_document_counted(&path, lines);
            }
            Event::Saved { path } => {
                if let Some(request) = self.aggregator.on_document_saved(&path) {
                    self.dispatch(request);
                }
            }
            Event::Rescan { root } => {
                if let Some(request) = self.aggregator.begin_scan(root.as_deref()) {
                    self.dispatch(request);
                }
            }
            Event::Query(reply) => {
                let _ = reply.send(self.aggregator.workspace_total());
            }
            Event::Shutdown => {}
        }
    }

    fn dispatch(&self, request: ScanRequest) {
        let outcomes = self.outcomes.clone();
        log::debug!("Dispatching scan #{}", request.version());
        rayon::spawn(move || {
            let _ = outcomes.send(request.run());
        });
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
