//! Selectable, filterable list result widget.

use crate::interpreter::{OnSelect, Selection};
use crate::tui::frame::{Line, Span, SpanStyle};
use crate::tui::settings;
use crate::tui::text::clip_to_width;
use crate::tui::widget::{pagination_line, Cursor, Nav, WidgetOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Live filter state for a focused list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    Off,
    /// Query is being typed; keys go to the query.
    Editing(String),
    /// Query applied; navigation keys work again.
    Applied(String),
}

impl FilterState {
    fn query(&self) -> Option<&str> {
        match self {
            Self::Off => None,
            Self::Editing(q) | Self::Applied(q) => Some(q),
        }
    }
}

pub struct ListWidget {
    items: Vec<String>,
    on_select: Option<OnSelect<String>>,
    interactive: bool,
    filter: FilterState,
    /// Indices into `items` that pass the filter.
    visible: Vec<usize>,
    cursor: Cursor,
    width: usize,
    height: usize,
}

impl ListWidget {
    pub fn new(
        items: Vec<String>,
        on_select: Option<OnSelect<String>>,
        width: usize,
        height: usize,
    ) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            items,
            on_select,
            interactive: false,
            filter: FilterState::Off,
            visible,
            cursor: Cursor::default(),
            width,
            height,
        }
    }

    /// Every item, unpaginated and without highlight, as written to files and
    /// non-interactive output.
    pub fn full(items: Vec<String>, width: usize) -> Vec<Line> {
        let height = items.len() + settings::LIST_RESERVED_ROWS;
        Self::new(items, None, width, height).view()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn is_editing_filter(&self) -> bool {
        matches!(self.filter, FilterState::Editing(_))
    }

    /// Currently highlighted item, if any pass the filter.
    pub fn selected_item(&self) -> Option<&str> {
        self.visible
            .get(self.cursor.selected)
            .map(|&idx| self.items[idx].as_str())
    }

    /// Focus or unfocus. Unfocusing drops any filter.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        if !interactive {
            self.set_filter(FilterState::Off);
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cursor.clamp(self.visible.len(), self.page_size());
    }

    fn page_size(&self) -> usize {
        self.height
            .saturating_sub(settings::LIST_RESERVED_ROWS)
            .min(self.visible.len())
            .max(1)
    }

    fn set_filter(&mut self, filter: FilterState) {
        let query_changed = self.filter.query() != filter.query();
        self.filter = filter;
        if query_changed {
            self.visible = match self.filter.query().filter(|q| !q.is_empty()) {
                Some(q) => self
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.contains(q))
                    .map(|(idx, _)| idx)
                    .collect(),
                None => (0..self.items.len()).collect(),
            };
            self.cursor = Cursor::default();
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> WidgetOutcome {
        if !self.interactive {
            return WidgetOutcome::Ignored;
        }
        if let FilterState::Editing(query) = &self.filter {
            let mut query = query.clone();
            let ctrl_or_alt = key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            match key.code {
                KeyCode::Enter if query.is_empty() => self.set_filter(FilterState::Off),
                KeyCode::Enter => self.set_filter(FilterState::Applied(query)),
                KeyCode::Esc => self.set_filter(FilterState::Off),
                KeyCode::Backspace => {
                    query.pop();
                    self.set_filter(FilterState::Editing(query));
                }
                KeyCode::Up | KeyCode::Down => {
                    if let Some(nav) = Nav::from_key(key) {
                        let page = self.page_size();
                        self.cursor.apply(nav, self.visible.len(), page);
                    }
                }
                KeyCode::Char(ch) if !ctrl_or_alt => {
                    query.push(ch);
                    self.set_filter(FilterState::Editing(query));
                }
                _ => {}
            }
            return WidgetOutcome::Updated;
        }

        if let Some(nav) = Nav::from_key(key) {
            let page = self.page_size();
            self.cursor.apply(nav, self.visible.len(), page);
            return WidgetOutcome::Updated;
        }

        match key.code {
            KeyCode::Char('/') => {
                let query = self.filter.query().unwrap_or_default().to_string();
                self.set_filter(FilterState::Editing(query));
                WidgetOutcome::Updated
            }
            KeyCode::Esc if self.filter != FilterState::Off => {
                self.set_filter(FilterState::Off);
                WidgetOutcome::Updated
            }
            KeyCode::Enter => {
                let Some(item) = self.selected_item().map(str::to_string) else {
                    return WidgetOutcome::Updated;
                };
                match &self.on_select {
                    Some(callback) => WidgetOutcome::Selected(Selection::Item {
                        callback: callback.clone(),
                        item,
                    }),
                    None => WidgetOutcome::Updated,
                }
            }
            _ => WidgetOutcome::Ignored,
        }
    }

    /// Rows for the current state. Highlight and filter line only appear
    /// while focused.
    pub fn view(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        let row_width = self.width.saturating_sub(settings::ROW_GUTTER_WIDTH);

        if self.interactive {
            match &self.filter {
                FilterState::Off => {}
                FilterState::Editing(q) => lines.push(Line::styled(
                    format!("{}{}{q}", settings::ROW_GUTTER, settings::FILTER_PROMPT),
                    SpanStyle::Prompt,
                )),
                FilterState::Applied(q) => lines.push(Line::styled(
                    format!("{}filter: {q}", settings::ROW_GUTTER),
                    SpanStyle::Status,
                )),
            }
        }

        if self.visible.is_empty() {
            lines.push(Line::styled(
                format!("{}no items", settings::ROW_GUTTER),
                SpanStyle::Dim,
            ));
            return lines;
        }

        let page = self.page_size();
        let end = (self.cursor.offset + page).min(self.visible.len());
        for pos in self.cursor.offset..end {
            let is_selected = self.interactive && pos == self.cursor.selected;
            let item = clip_to_width(&self.items[self.visible[pos]], row_width);
            let mut line = Line::plain(settings::row_gutter(is_selected));
            let style = if is_selected {
                SpanStyle::Selected
            } else {
                SpanStyle::Plain
            };
            line.push(Span::new(item, style));
            lines.push(line);
        }
        if let Some(footer) = pagination_line(self.cursor.offset, end - self.cursor.offset, self.visible.len()) {
            lines.push(footer);
        }
        lines
    }
}
