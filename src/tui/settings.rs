//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, glyphs, colors,
//! viewport reservations, and spinner behavior.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout / viewport
// ---------------------------------------------------------------------------

/// Fallback terminal size when the real one cannot be queried.
pub const FALLBACK_COLUMNS: u16 = 80;
pub const FALLBACK_ROWS: u16 = 24;

/// Left gutter in front of every list/table row.
pub const ROW_GUTTER: &str = "  ";
pub const ROW_GUTTER_SELECTED: &str = "> ";
pub const ROW_GUTTER_WIDTH: usize = 2;

/// Rows kept free for the prompt and chrome around a list.
pub const LIST_RESERVED_ROWS: usize = 4;
/// Rows kept free for the prompt, header, and chrome around a table.
pub const TABLE_RESERVED_ROWS: usize = 6;

/// Horizontal padding on each side of a table cell.
pub const CELL_PADDING: usize = 1;
pub const TABLE_RULE: char = '\u{2500}';

// ---------------------------------------------------------------------------
// Prompt strings / labels
// ---------------------------------------------------------------------------

pub const DEFAULT_PROMPT: &str = "replkit >";
pub const PROMPT_SPACER: &str = " ";
pub const SEARCH_PROMPT_LABEL: &str = "(reverse-i-search)";
pub const FILTER_PROMPT: &str = "/";
pub const ERROR_PREFIX: &str = "ERROR: ";
pub const EXECUTING_LABEL: &str = "executing...";

pub const HELP_LIST_FOCUSED: &str =
    "up/down move \u{2022} / filter \u{2022} enter select \u{2022} q/ctrl-j back";
pub const HELP_TABLE_FOCUSED: &str = "up/down move \u{2022} enter select \u{2022} q/ctrl-j back";
pub const HELP_WIDGET_UNFOCUSED: &str = "ctrl-k focus \u{2022} esc dismiss";

// ---------------------------------------------------------------------------
// Spinner / event loop
// ---------------------------------------------------------------------------

pub const PROGRESS_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
pub const PROGRESS_TICK_MS: u64 = 100;

pub const REPL_EVENT_POLL_MS: u64 = 80;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT: Color = Color::Cyan;
pub const COLOR_SUGGESTION: Color = Color::DarkGrey;
pub const COLOR_STATUS_LINE: Color = Color::DarkGrey;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_HEADER: Color = Color::Yellow;
pub const COLOR_SELECTED_FG: Color = Color::Black;
pub const COLOR_SELECTED_BG: Color = Color::Cyan;

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

/// Prompt text as painted in front of the buffer (prompt plus one space).
pub fn prompt_text(prompt: &str) -> String {
    format!("{prompt}{PROMPT_SPACER}")
}

/// Row prefix for list/table rows.
pub fn row_gutter(is_selected: bool) -> &'static str {
    if is_selected {
        ROW_GUTTER_SELECTED
    } else {
        ROW_GUTTER
    }
}
