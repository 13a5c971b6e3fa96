use std::fmt;
use std::time::Duration;

use monitor_common::{futures::channel::oneshot, tonic::Status};
use tokio::{runtime::Handle, task::JoinHandle, time};

/// Terminal state of one status stream.
#[derive(Debug)]
pub enum StreamOutcome {
    Completed,
    Failed(Status),
}

/// Result of waiting on a [`Completion`] with a bounded timeout.
#[derive(Debug)]
pub enum WaitOutcome {
    Completed,
    /// The stream is still running. The call is not cancelled; the completion
    /// is handed back so it can be awaited again or aborted.
    TimedOut(Completion),
    Failed(Status),
}

impl WaitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WaitOutcome::Completed)
    }
}

impl From<StreamOutcome> for WaitOutcome {
    fn from(outcome: StreamOutcome) -> Self {
        match outcome {
            StreamOutcome::Completed => WaitOutcome::Completed,
            StreamOutcome::Failed(status) => WaitOutcome::Failed(status),
        }
    }
}

/// Producing half of a completion signal. Consumed by [`Signal::fire`], so a
/// stream can report its terminal state at most once.
#[derive(Debug)]
pub(crate) struct Signal(oneshot::Sender<StreamOutcome>);

impl Signal {
    pub(crate) fn fire(self, outcome: StreamOutcome) {
        // The waiter may already be gone; nobody is left to tell.
        let _ = self.0.send(outcome);
    }
}

/// Single-use countdown for an asynchronous status call.
pub struct Completion {
    rx: oneshot::Receiver<StreamOutcome>,
    task: JoinHandle<()>,
    handle: Handle,
}

impl Completion {
    pub(crate) fn channel() -> (Signal, oneshot::Receiver<StreamOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Signal(tx), rx)
    }

    pub(crate) fn new(
        rx: oneshot::Receiver<StreamOutcome>,
        task: JoinHandle<()>,
        handle: Handle,
    ) -> Self {
        Completion { rx, task, handle }
    }

    /// Blocks the calling thread until the stream terminates or `timeout`
    /// elapses. Must not be called from within an async context.
    pub fn wait(mut self, timeout: Duration) -> WaitOutcome {
        let handle = self.handle.clone();
        let rx = &mut self.rx;
        match handle.block_on(async { time::timeout(timeout, rx).await }) {
            Ok(Ok(outcome)) => outcome.into(),
            Ok(Err(oneshot::Canceled)) => {
                WaitOutcome::Failed(Status::cancelled("status stream was aborted"))
            }
            Err(_elapsed) => WaitOutcome::TimedOut(self),
        }
    }

    /// Cancels the in-flight stream. A later [`Completion::wait`] reports
    /// `Failed` unless the stream had already finished.
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("finished", &self.is_finished())
            .finish()
    }
}
