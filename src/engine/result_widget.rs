//! The one list-or-table widget the engine may hold, plus static rendering of
//! command results for save-to files and non-interactive output.

use crate::interpreter::CommandResult;
use crate::tui::frame::lines_to_text;
use crate::tui::{Line, ListWidget, TableWidget, WidgetOutcome};
use crossterm::event::KeyEvent;

pub enum ResultWidget {
    List(ListWidget),
    Table(TableWidget),
}

impl ResultWidget {
    pub fn is_interactive(&self) -> bool {
        match self {
            Self::List(list) => list.is_interactive(),
            Self::Table(table) => table.is_interactive(),
        }
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        match self {
            Self::List(list) => list.set_interactive(interactive),
            Self::Table(table) => table.set_interactive(interactive),
        }
    }

    /// True while a list filter query is being typed.
    pub fn is_editing_filter(&self) -> bool {
        matches!(self, Self::List(list) if list.is_editing_filter())
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        match self {
            Self::List(list) => list.resize(width, height),
            Self::Table(table) => table.resize(width, height),
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> WidgetOutcome {
        match self {
            Self::List(list) => list.handle_key(key),
            Self::Table(table) => table.handle_key(key),
        }
    }

    pub fn view(&self) -> Vec<Line> {
        match self {
            Self::List(list) => list.view(),
            Self::Table(table) => table.view(),
        }
    }
}

/// Render a result the way it appears on screen, without pagination.
///
/// `Empty` is empty, `Simple` is its text verbatim, widgets list every row at
/// `width` columns, and a nested `SaveTo` renders its inner result.
pub fn render_static(result: &CommandResult, width: usize) -> String {
    match result {
        CommandResult::Empty => String::new(),
        CommandResult::Simple(text) => text.clone(),
        CommandResult::List { items, .. } => lines_to_text(&ListWidget::full(items.clone(), width)),
        CommandResult::Table { rows, .. } => lines_to_text(&TableWidget::full(rows.clone(), width)),
        CommandResult::SaveTo { result, .. } => render_static(result, width),
    }
}
