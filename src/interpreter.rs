//! Pluggable command interpreter contract.
//!
//! The embedding application supplies an [`Interpreter`]; the engine calls
//! `exec` off the event loop and `suggest` inline on every keystroke. Results
//! come back as a closed [`CommandResult`] sum type.

pub use crate::error::InterpreterError;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Interpreter trait
// ---------------------------------------------------------------------------

/// Command interpreter driven by the REPL engine.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Execute one submitted command. May take arbitrary time.
    async fn exec(&self, command: &str) -> Result<CommandResult, InterpreterError>;

    /// Completion candidates for a partially typed line. Must return quickly.
    fn suggest(&self, partial_input: &str) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// Command results
// ---------------------------------------------------------------------------

/// Selection callback attached to a list item or table row.
///
/// Returning `None` is rendered as an empty line.
pub type OnSelect<T> = Arc<dyn Fn(T) -> Option<CommandResult> + Send + Sync>;

/// Outcome of one interpreter call or selection callback.
#[derive(Clone)]
pub enum CommandResult {
    /// Nothing to render.
    Empty,
    /// Plain text appended to the scrollback.
    Simple(String),
    /// Selectable list of strings.
    List {
        items: Vec<String>,
        on_select: Option<OnSelect<String>>,
    },
    /// Selectable table; the first row is the header.
    Table {
        rows: Vec<Vec<String>>,
        on_select: Option<OnSelect<Vec<String>>>,
    },
    /// Render `result` and write it to `path` instead of the terminal.
    SaveTo {
        path: PathBuf,
        result: Box<CommandResult>,
    },
}

impl CommandResult {
    pub fn simple(text: impl Into<String>) -> Self {
        Self::Simple(text.into())
    }

    /// Read-only list; focusing it allows scrolling and filtering only.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            items: items.into_iter().map(Into::into).collect(),
            on_select: None,
        }
    }

    /// List whose confirmed item is handed to `on_select`.
    pub fn list_with_select<I, S, F>(items: I, on_select: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(String) -> Option<CommandResult> + Send + Sync + 'static,
    {
        Self::List {
            items: items.into_iter().map(Into::into).collect(),
            on_select: Some(Arc::new(on_select)),
        }
    }

    pub fn table(rows: Vec<Vec<String>>) -> Self {
        Self::Table {
            rows,
            on_select: None,
        }
    }

    /// Table whose confirmed row (ordered fields) is handed to `on_select`.
    pub fn table_with_select<F>(rows: Vec<Vec<String>>, on_select: F) -> Self
    where
        F: Fn(Vec<String>) -> Option<CommandResult> + Send + Sync + 'static,
    {
        Self::Table {
            rows,
            on_select: Some(Arc::new(on_select)),
        }
    }

    pub fn save_to(path: impl Into<PathBuf>, result: CommandResult) -> Self {
        Self::SaveTo {
            path: path.into(),
            result: Box::new(result),
        }
    }

    /// Short variant label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Simple(_) => "simple",
            Self::List { .. } => "list",
            Self::Table { .. } => "table",
            Self::SaveTo { .. } => "save-to",
        }
    }
}

impl fmt::Debug for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Simple(text) => f.debug_tuple("Simple").field(text).finish(),
            Self::List { items, on_select } => f
                .debug_struct("List")
                .field("items", items)
                .field("selectable", &on_select.is_some())
                .finish(),
            Self::Table { rows, on_select } => f
                .debug_struct("Table")
                .field("rows", rows)
                .field("selectable", &on_select.is_some())
                .finish(),
            Self::SaveTo { path, result } => f
                .debug_struct("SaveTo")
                .field("path", path)
                .field("result", result)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A confirmed widget selection waiting for its callback to run.
///
/// Consumed by value, so each confirm invokes the callback at most once.
pub enum Selection {
    Item {
        callback: OnSelect<String>,
        item: String,
    },
    Row {
        callback: OnSelect<Vec<String>>,
        row: Vec<String>,
    },
}

impl Selection {
    /// Run the callback and map "no result" to an empty line.
    pub fn invoke(self) -> CommandResult {
        let result = match self {
            Self::Item { callback, item } => callback(item),
            Self::Row { callback, row } => callback(row),
        };
        result.unwrap_or_else(|| CommandResult::Simple(String::new()))
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item { item, .. } => f.debug_struct("Item").field("item", item).finish(),
            Self::Row { row, .. } => f.debug_struct("Row").field("row", row).finish(),
        }
    }
}
