//! Single-threaded cooperative event loop around [`ReplEngine`].
//!
//! The loop owns the engine and a render sink. It receives one
//! [`EngineEvent`] at a time from a channel fed by the terminal reader thread
//! and by background tasks, hands it to the engine, performs the returned
//! effects, and repaints the live region. Only interpreter calls, selection
//! callbacks, and file writes run off the loop; they report back through the
//! same channel.

mod persist;
mod tasks;
mod terminal;

pub use persist::{append_history_line, write_saved_output};
pub use terminal::terminal_size;

use crate::engine::{Effect, EngineEvent, EngineOptions, ReplEngine};
use crate::error::{ReplError, StartupError};
use crate::interpreter::Interpreter;
use crate::tui::{settings, History, RenderSink, TerminalRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tasks::{
    spawn_exec_task, spawn_history_writer, spawn_save, spawn_select_task, HistorySender,
};
use terminal::{InputReader, RawModeGuard};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Drives one engine against one render sink until the engine exits.
pub struct EventLoop<S: RenderSink> {
    engine: ReplEngine,
    interpreter: Arc<dyn Interpreter>,
    sink: S,
    tx: mpsc::UnboundedSender<EngineEvent>,
    rx: mpsc::UnboundedReceiver<EngineEvent>,
    /// Started on the first append so lines land on disk in submission order.
    history_writer: Option<HistorySender>,
    /// Paint the live region after events; off for single-shot runs.
    interactive: bool,
}

impl<S: RenderSink> EventLoop<S> {
    pub fn new(
        engine: ReplEngine,
        interpreter: Arc<dyn Interpreter>,
        sink: S,
        interactive: bool,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine,
            interpreter,
            sink,
            tx,
            rx,
            history_writer: None,
            interactive,
        }
    }

    /// Channel for external event sources (terminal reader, tests).
    pub fn sender(&self) -> mpsc::UnboundedSender<EngineEvent> {
        self.tx.clone()
    }

    pub fn engine(&self) -> &ReplEngine {
        &self.engine
    }

    /// Process events until the engine requests exit; returns the exit status.
    pub async fn run(&mut self) -> Result<i32, ReplError> {
        let effects = self.engine.start();
        if let Some(code) = self.perform(effects)? {
            return self.finish(code);
        }
        self.redraw()?;

        let mut ticker = tokio::time::interval(Duration::from_millis(settings::PROGRESS_TICK_MS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let executing = self.engine.is_executing();
            let next = tokio::select! {
                maybe = self.rx.recv() => maybe,
                _ = ticker.tick(), if executing => Some(EngineEvent::Tick),
            };
            let Some(event) = next else {
                return self.finish(0);
            };

            let is_tick = matches!(event, EngineEvent::Tick);
            let effects = self.engine.handle(event);
            if let Some(code) = self.perform(effects)? {
                return self.finish(code);
            }
            if !is_tick || self.engine.is_executing() {
                self.redraw()?;
            }
        }
    }

    fn perform(&mut self, effects: Vec<Effect>) -> Result<Option<i32>, ReplError> {
        let mut exit = None;
        for effect in effects {
            match effect {
                Effect::Print(entry) => {
                    if self.interactive {
                        self.sink.scrollback(&entry)?;
                    } else {
                        self.sink.stdout(&entry.plain_text())?;
                    }
                }
                Effect::Execute(command) => {
                    spawn_exec_task(Arc::clone(&self.interpreter), command, self.tx.clone());
                }
                Effect::Select(selection) => spawn_select_task(selection, self.tx.clone()),
                Effect::AppendHistory { path, line } => {
                    let tx = &self.tx;
                    let writer = self
                        .history_writer
                        .get_or_insert_with(|| spawn_history_writer(tx.clone()));
                    if writer.send((path, line)).is_err() {
                        warn!("history writer stopped");
                    }
                }
                Effect::WriteFile { path, content } => {
                    debug!(path = %path.display(), bytes = content.len(), "saving result");
                    spawn_save(path, content, self.tx.clone());
                }
                Effect::Stdout(text) => self.sink.stdout(&text)?,
                Effect::Stderr(text) => self.sink.stderr(&text)?,
                Effect::Exit(code) => exit = Some(code),
            }
        }
        Ok(exit)
    }

    fn redraw(&mut self) -> Result<(), ReplError> {
        if self.interactive {
            self.sink.draw(&self.engine.view())?;
        }
        Ok(())
    }

    fn finish(&mut self, code: i32) -> Result<i32, ReplError> {
        if self.interactive {
            self.sink.finish()?;
        }
        info!(code, "event loop finished");
        Ok(code)
    }
}

// ---------------------------------------------------------------------------
// Embedding facade
// ---------------------------------------------------------------------------

/// Options for [`Repl`].
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Prompt text; one space is added when painting.
    pub prompt: String,
    /// Append-only history log, loaded at startup.
    pub history_file: Option<PathBuf>,
    pub color: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            prompt: settings::DEFAULT_PROMPT.to_string(),
            history_file: None,
            color: true,
        }
    }
}

/// Ready-to-run REPL over a caller-supplied interpreter.
///
/// Both run modes need a tokio runtime.
pub struct Repl {
    interpreter: Arc<dyn Interpreter>,
    options: ReplOptions,
    history: History,
}

impl Repl {
    /// Load history and prepare a session. An unreadable history file
    /// (other than a missing one) is a startup error.
    pub fn new(interpreter: Arc<dyn Interpreter>, options: ReplOptions) -> Result<Self, ReplError> {
        let history = match &options.history_file {
            Some(path) => History::load(path)?,
            None => History::new(),
        };
        debug!(entries = history.len(), "history loaded");
        Ok(Self {
            interpreter,
            options,
            history,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn engine(&self, non_interactive: Option<String>) -> ReplEngine {
        let (width, height) = terminal_size();
        ReplEngine::new(
            Arc::clone(&self.interpreter),
            EngineOptions {
                prompt: self.options.prompt.clone(),
                history: self.history.clone(),
                history_file: self.options.history_file.clone(),
                width,
                height,
                non_interactive,
            },
        )
    }

    /// Interactive session on the controlling terminal until Ctrl-D.
    pub async fn run(self) -> Result<i32, ReplError> {
        let engine = self.engine(None);
        let _raw = RawModeGuard::acquire().map_err(StartupError::Terminal)?;
        let renderer = TerminalRenderer::stdio(self.options.color);
        let mut event_loop = EventLoop::new(engine, self.interpreter, renderer, true);
        let mut reader = InputReader::spawn(event_loop.sender());
        let result = event_loop.run().await;
        reader.stop();
        result
    }

    /// Execute exactly one command, print its result, and return the exit
    /// status (0 on success, 1 on an interpreter or save error).
    pub async fn run_non_interactive(self, command: impl Into<String>) -> Result<i32, ReplError> {
        let engine = self.engine(Some(command.into()));
        let renderer = TerminalRenderer::stdio(false);
        let mut event_loop = EventLoop::new(engine, self.interpreter, renderer, false);
        event_loop.run().await
    }
}
