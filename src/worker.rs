//! Background store worker.
//!
//! Runs as a task on the tokio runtime, executing [`Command`]s against a
//! shared [`ArticleStore`] and sending a [`StoreSnapshot`] back after each
//! one.  The UI thread never awaits; it drains updates on every tick.
//!
//! Commands run one at a time, in the order they were sent.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::store::{ArticleStore, StoreSnapshot};

/// Requests the reader can make of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the first page (`reset`) or append the next one.
    LoadPage { reset: bool },
    /// Select one article by id.
    Open(String),
}

/// The UI side of a running worker.
pub struct WorkerHandle {
    commands: mpsc::UnboundedSender<Command>,
    updates: mpsc::UnboundedReceiver<StoreSnapshot>,
}

impl WorkerHandle {
    /// Queue a command.  Returns `false` if the worker has stopped.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Next pending snapshot, without waiting.
    pub fn try_recv(&mut self) -> Option<StoreSnapshot> {
        self.updates.try_recv().ok()
    }

    /// Wait for the next snapshot.
    pub async fn recv(&mut self) -> Option<StoreSnapshot> {
        self.updates.recv().await
    }
}

/// Spawn the worker task on the current runtime.
///
/// The task ends when the handle is dropped.
pub fn spawn(store: Arc<ArticleStore>) -> WorkerHandle {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            debug!(?command, "running store command");
            match command {
                Command::LoadPage { reset } => store.load_page(reset).await,
                Command::Open(id) => store.load_by_id(&id).await,
            }
            // If the receiver is gone the reader has exited.
            if update_tx.send(store.snapshot()).is_err() {
                return;
            }
        }
    });

    WorkerHandle {
        commands: command_tx,
        updates: update_rx,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
