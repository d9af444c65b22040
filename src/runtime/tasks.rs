//! Background task spawning for effects that must not block the loop.
//!
//! Every task reports back by posting an [`EngineEvent`] on the loop's
//! channel. A send failure means the loop already exited, so it is ignored.

use crate::engine::EngineEvent;
use crate::error::InterpreterError;
use crate::interpreter::{Interpreter, Selection};
use crate::runtime::persist::{append_history_line, write_saved_output};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub(super) type EventSender = mpsc::UnboundedSender<EngineEvent>;

/// Run one interpreter call and post its completion.
pub(super) fn spawn_exec_task(interpreter: Arc<dyn Interpreter>, command: String, tx: EventSender) {
    tokio::spawn(async move {
        debug!(command = %command, "interpreter call started");
        let result = interpreter.exec(&command).await;
        let _ = tx.send(EngineEvent::CommandCompleted(result));
    });
}

/// Run a selection callback on the blocking pool; callbacks are plain
/// synchronous closures and may do arbitrary work.
pub(super) fn spawn_select_task(selection: Selection, tx: EventSender) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || selection.invoke())
            .await
            .map_err(|err| InterpreterError::new(format!("selection callback failed: {err}")));
        let _ = tx.send(EngineEvent::CommandCompleted(result));
    });
}

pub(super) type HistorySender = mpsc::UnboundedSender<(PathBuf, String)>;

/// Start the single history writer. Lines are appended strictly in the order
/// they are queued; only failures come back. The task ends when the returned
/// sender is dropped.
pub(super) fn spawn_history_writer(tx: EventSender) -> HistorySender {
    let (lines_tx, mut lines_rx) = mpsc::unbounded_channel::<(PathBuf, String)>();
    tokio::spawn(async move {
        while let Some((path, line)) = lines_rx.recv().await {
            if let Err(err) = append_history_line(&path, &line).await {
                warn!(error = %err, "history append failed");
                let _ = tx.send(EngineEvent::PersistenceFailed(err));
            }
        }
    });
    lines_tx
}

pub(super) fn spawn_save(path: PathBuf, content: String, tx: EventSender) {
    tokio::spawn(async move {
        let result = write_saved_output(&path, &content).await.map(|()| path);
        let _ = tx.send(EngineEvent::SaveFinished(result));
    });
}
