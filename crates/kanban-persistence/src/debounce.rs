//! Debounced background saving.
//!
//! Every published snapshot replaces the pending one and pushes the write
//! deadline back by the debounce delay, so a burst of edits costs one write.
//! Failed writes are logged and not retried; the next publish writes again.
//!
//! Teardown: dropping every [`SaveHandle`] closes the channel, and the worker
//! writes whatever is still pending before it exits. [`SaveHandle::cancel`]
//! drops the pending snapshot instead.

use crate::gateway::PersistenceGateway;
use kanban_core::Frozen;
use kanban_domain::{BoardSnapshot, SnapshotSink};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug)]
enum SaveCommand {
    Publish(Frozen<BoardSnapshot>),
    Cancel,
}

/// Outcome of a writer's lifetime, returned when the worker exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: usize,
    pub failed: usize,
}

/// Sending side of the writer. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SaveHandle {
    tx: mpsc::UnboundedSender<SaveCommand>,
}

impl SaveHandle {
    /// Queue `snapshot` and restart the debounce delay.
    pub fn publish(&self, snapshot: Frozen<BoardSnapshot>) {
        self.send(SaveCommand::Publish(snapshot));
    }

    /// Forget the pending snapshot, if any, without writing it.
    pub fn cancel(&self) {
        self.send(SaveCommand::Cancel);
    }

    fn send(&self, command: SaveCommand) {
        // Send only fails if the worker is gone
        if let Err(e) = self.tx.send(command) {
            tracing::error!("Failed to queue save: channel closed: {:?}", e.0);
        }
    }
}

impl SnapshotSink for SaveHandle {
    fn publish(&self, snapshot: &Frozen<BoardSnapshot>) {
        SaveHandle::publish(self, snapshot.clone());
    }
}

pub struct DebouncedWriter;

impl DebouncedWriter {
    /// Start the writer on the current tokio runtime.
    pub fn spawn(
        gateway: PersistenceGateway,
        delay: Duration,
    ) -> (SaveHandle, JoinHandle<SaveReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(gateway, delay, rx));
        (SaveHandle { tx }, worker)
    }
}

async fn run(
    gateway: PersistenceGateway,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<SaveCommand>,
) -> SaveReport {
    let mut report = SaveReport::default();
    let mut pending: Option<Frozen<BoardSnapshot>> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(SaveCommand::Publish(snapshot)) => {
                    pending = Some(snapshot);
                    deadline = Instant::now() + delay;
                }
                Some(SaveCommand::Cancel) => {
                    if pending.take().is_some() {
                        tracing::debug!("Pending save cancelled");
                    }
                }
                None => {
                    if let Some(snapshot) = pending.take() {
                        tracing::debug!("Flushing pending save before shutdown");
                        write(&gateway, &snapshot, &mut report).await;
                    }
                    break;
                }
            },
            _ = tokio::time::sleep_until(deadline), if pending.is_some() => {
                if let Some(snapshot) = pending.take() {
                    write(&gateway, &snapshot, &mut report).await;
                }
            }
        }
    }

    tracing::debug!(
        "Save worker exiting: {} saved, {} failed",
        report.saved,
        report.failed
    );
    report
}

async fn write(gateway: &PersistenceGateway, snapshot: &BoardSnapshot, report: &mut SaveReport) {
    match gateway.save(snapshot).await {
        Ok(()) => report.saved += 1,
        Err(e) => {
            report.failed += 1;
            tracing::error!("Failed to save board {}: {}", gateway.key(), e);
        }
    }
}
