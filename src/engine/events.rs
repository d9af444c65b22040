//! Inputs and outputs of the engine state machine.

use crate::error::{InterpreterError, PersistenceError};
use crate::interpreter::{CommandResult, Selection};
use crate::tui::ScrollbackEntry;
use crossterm::event::KeyEvent;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    ReadingInput,
    ReadingInputWithList,
    ReadingInputWithTable,
    ExecutingCommand,
    ListInteraction,
    TableInteraction,
    NonInteractive,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadingInput => "reading-input",
            Self::ReadingInputWithList => "reading-input-with-list",
            Self::ReadingInputWithTable => "reading-input-with-table",
            Self::ExecutingCommand => "executing-command",
            Self::ListInteraction => "list-interaction",
            Self::TableInteraction => "table-interaction",
            Self::NonInteractive => "non-interactive",
        };
        f.write_str(name)
    }
}

/// Everything that can drive a transition.
#[derive(Debug)]
pub enum EngineEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Spinner heartbeat.
    Tick,
    /// An interpreter call or selection callback finished.
    CommandCompleted(Result<CommandResult, InterpreterError>),
    /// A background history append failed.
    PersistenceFailed(PersistenceError),
    /// A save-to write finished.
    SaveFinished(Result<PathBuf, PersistenceError>),
    /// The terminal reader stopped on an I/O error; no more keys will arrive.
    InputFailed(std::io::Error),
}

/// Side effects requested by a transition, performed by the event loop.
#[derive(Debug)]
pub enum Effect {
    Print(ScrollbackEntry),
    /// Run the interpreter on this command off the loop.
    Execute(String),
    /// Run a selection callback off the loop.
    Select(Selection),
    AppendHistory { path: PathBuf, line: String },
    WriteFile { path: PathBuf, content: String },
    /// Non-interactive program output.
    Stdout(String),
    /// Non-interactive diagnostics.
    Stderr(String),
    /// Stop the loop with this process exit status.
    Exit(i32),
}
