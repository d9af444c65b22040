//! Pieces shared by the list and table result widgets.

use crate::interpreter::Selection;
use crate::tui::frame::{Line, SpanStyle};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding one key to a focused widget.
#[derive(Debug)]
pub enum WidgetOutcome {
    /// Key not meaningful here; the caller may handle it.
    Ignored,
    /// Widget state changed (or the key was swallowed).
    Updated,
    /// Enter confirmed an item; the widget should be echoed and discarded.
    Selected(Selection),
}

/// Navigation intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nav {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

impl Nav {
    pub(crate) fn from_key(key: &KeyEvent) -> Option<Self> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Self::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::Down),
            KeyCode::PageUp => Some(Self::PageUp),
            KeyCode::PageDown => Some(Self::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Self::First),
            KeyCode::End | KeyCode::Char('G') => Some(Self::Last),
            _ => None,
        }
    }
}

/// Selection index plus scroll offset over a paged set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub selected: usize,
    pub offset: usize,
}

impl Cursor {
    pub(crate) fn apply(&mut self, nav: Nav, len: usize, page: usize) {
        if len == 0 {
            *self = Self::default();
            return;
        }
        let last = len - 1;
        self.selected = match nav {
            Nav::Up => self.selected.saturating_sub(1),
            Nav::Down => (self.selected + 1).min(last),
            Nav::PageUp => self.selected.saturating_sub(page.max(1)),
            Nav::PageDown => (self.selected + page.max(1)).min(last),
            Nav::First => 0,
            Nav::Last => last,
        };
        self.clamp(len, page);
    }

    /// Keep `selected` inside `len` and scrolled into a `page`-row window.
    pub(crate) fn clamp(&mut self, len: usize, page: usize) {
        if len == 0 {
            *self = Self::default();
            return;
        }
        let page = page.max(1);
        self.selected = self.selected.min(len - 1);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        if self.selected >= self.offset + page {
            self.offset = self.selected + 1 - page;
        }
        self.offset = self.offset.min(len.saturating_sub(page));
    }
}

/// `[a-b of N]` footer shown when not every row fits.
pub(crate) fn pagination_line(offset: usize, shown: usize, total: usize) -> Option<Line> {
    if shown >= total {
        return None;
    }
    let first = offset + 1;
    let last = offset + shown;
    Some(Line::styled(
        format!("  [{first}-{last} of {total}]"),
        SpanStyle::Dim,
    ))
}
