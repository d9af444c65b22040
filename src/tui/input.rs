//! Single-line input editor with history, reverse search, and suggestions.
//!
//! The editor is pure state: it consumes decoded key events and reports what
//! happened. The engine owns submission semantics and persistence; the
//! renderer owns terminal mechanics.

use crate::tui::frame::{Line, Span, SpanStyle};
use crate::tui::history::History;
use crate::tui::input_buffer::{
    char_count, delete_char_at_cursor, delete_char_before_cursor, delete_char_range,
    insert_char_at_cursor, next_word_end, previous_word_start,
};
use crate::tui::settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Key changed (or deliberately did not change) editor state.
    Consumed,
    /// Enter on a non-empty buffer; the buffer has been cleared.
    Submitted(String),
    /// Key has no meaning for the editor.
    Ignored,
}

/// Reverse-incremental search sub-state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseSearch {
    pub query: String,
    /// History entries containing `query`, most recent first.
    pub matches: Vec<String>,
    /// Always within `0..=matches.len().saturating_sub(1)`.
    pub selected: usize,
}

impl ReverseSearch {
    pub fn current(&self) -> Option<&str> {
        self.matches.get(self.selected).map(String::as_str)
    }

    fn recompute(&mut self, history: &History) {
        self.matches = history.search(&self.query);
        self.selected = 0;
    }

    fn advance(&mut self) {
        let last = self.matches.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Normal,
    ReverseSearch(ReverseSearch),
}

/// Editable line buffer plus history cursor.
#[derive(Debug, Clone)]
pub struct LineEditor {
    prompt: String,
    buffer: String,
    /// Cursor in char indices.
    cursor: usize,
    history: History,
    /// 0 is the live buffer; N shows the N-th most recent entry.
    history_offset: usize,
    /// Live buffer saved while browsing history.
    live_draft: String,
    mode: EditorMode,
    suggestions: Vec<String>,
}

impl LineEditor {
    pub fn new(prompt: impl Into<String>, history: History) -> Self {
        Self {
            prompt: prompt.into(),
            buffer: String::new(),
            cursor: 0,
            history,
            history_offset: 0,
            live_draft: String::new(),
            mode: EditorMode::Normal,
            suggestions: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, EditorMode::ReverseSearch(_))
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Append a submitted line to the in-memory history.
    pub fn record(&mut self, line: &str) {
        self.history.push(line);
    }

    /// Replace the displayed suggestion set.
    ///
    /// History entries come first (most recent first), followed by the
    /// interpreter's candidates; repeated strings are shown once.
    pub fn refresh_suggestions(&mut self, interpreter_suggestions: Vec<String>) {
        let mut merged: Vec<String> = Vec::new();
        let candidates = self
            .history
            .iter_recent()
            .map(str::to_string)
            .chain(interpreter_suggestions);
        for candidate in candidates {
            if !merged.contains(&candidate) {
                merged.push(candidate);
            }
        }
        self.suggestions = merged;
    }

    /// Remaining text of the first suggestion extending the buffer, if the
    /// cursor sits at the end of a non-empty buffer.
    pub fn completion_hint(&self) -> Option<&str> {
        if self.buffer.is_empty() || self.cursor != char_count(&self.buffer) {
            return None;
        }
        self.suggestions
            .iter()
            .find(|s| s.len() > self.buffer.len() && s.starts_with(&self.buffer))
            .map(|s| &s[self.buffer.len()..])
    }

    /// Feed one key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> EditorOutcome {
        if let EditorMode::ReverseSearch(search) = &mut self.mode {
            let outcome = handle_search_key(search, &self.history, key);
            return match outcome {
                SearchOutcome::Stay => EditorOutcome::Consumed,
                SearchOutcome::Commit(line) => {
                    self.mode = EditorMode::Normal;
                    self.set_buffer(line);
                    EditorOutcome::Consumed
                }
                SearchOutcome::Cancel => {
                    self.mode = EditorMode::Normal;
                    EditorOutcome::Consumed
                }
            };
        }
        self.handle_normal_key(key)
    }

    fn handle_normal_key(&mut self, key: &KeyEvent) -> EditorOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Up => return self.history_prev(),
            KeyCode::Down => return self.history_next(),
            KeyCode::Char('p') if ctrl => return self.history_prev(),
            KeyCode::Char('n') if ctrl => return self.history_next(),
            _ => {}
        }

        // Anything other than history navigation makes the shown text live.
        self.detach_history();

        match key.code {
            KeyCode::Enter => {
                if self.buffer.is_empty() {
                    return EditorOutcome::Consumed;
                }
                let line = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                EditorOutcome::Submitted(line)
            }
            KeyCode::Char('r') if ctrl => {
                self.mode = EditorMode::ReverseSearch(ReverseSearch::default());
                EditorOutcome::Consumed
            }
            KeyCode::Char('c') if ctrl => {
                self.set_buffer(String::new());
                EditorOutcome::Consumed
            }
            KeyCode::Tab => {
                if let Some(rest) = self.completion_hint().map(str::to_string) {
                    self.buffer.push_str(&rest);
                    self.cursor = char_count(&self.buffer);
                }
                EditorOutcome::Consumed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                EditorOutcome::Consumed
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(char_count(&self.buffer));
                EditorOutcome::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditorOutcome::Consumed
            }
            KeyCode::End => {
                self.cursor = char_count(&self.buffer);
                EditorOutcome::Consumed
            }
            KeyCode::Backspace => {
                delete_char_before_cursor(&mut self.buffer, &mut self.cursor);
                EditorOutcome::Consumed
            }
            KeyCode::Delete => {
                delete_char_at_cursor(&mut self.buffer, self.cursor);
                EditorOutcome::Consumed
            }
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                EditorOutcome::Consumed
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = char_count(&self.buffer);
                EditorOutcome::Consumed
            }
            KeyCode::Char('b') if ctrl => {
                self.cursor = self.cursor.saturating_sub(1);
                EditorOutcome::Consumed
            }
            KeyCode::Char('f') if ctrl => {
                self.cursor = (self.cursor + 1).min(char_count(&self.buffer));
                EditorOutcome::Consumed
            }
            KeyCode::Char('b') if alt => {
                self.cursor = previous_word_start(&self.buffer, self.cursor);
                EditorOutcome::Consumed
            }
            KeyCode::Char('f') if alt => {
                self.cursor = next_word_end(&self.buffer, self.cursor);
                EditorOutcome::Consumed
            }
            KeyCode::Char('k') if ctrl => {
                // Emacs-style kill-to-end-of-line.
                let end = char_count(&self.buffer);
                delete_char_range(&mut self.buffer, self.cursor, end);
                EditorOutcome::Consumed
            }
            KeyCode::Char('u') if ctrl => {
                delete_char_range(&mut self.buffer, 0, self.cursor);
                self.cursor = 0;
                EditorOutcome::Consumed
            }
            KeyCode::Char('w') if ctrl => {
                let start = previous_word_start(&self.buffer, self.cursor);
                delete_char_range(&mut self.buffer, start, self.cursor);
                self.cursor = start;
                EditorOutcome::Consumed
            }
            KeyCode::Char(ch) if !ctrl && !alt => {
                insert_char_at_cursor(&mut self.buffer, &mut self.cursor, ch);
                EditorOutcome::Consumed
            }
            _ => EditorOutcome::Ignored,
        }
    }

    fn history_prev(&mut self) -> EditorOutcome {
        if self.history_offset >= self.history.len() {
            return EditorOutcome::Consumed;
        }
        if self.history_offset == 0 {
            self.live_draft = self.buffer.clone();
        }
        self.history_offset += 1;
        self.show_history_entry();
        EditorOutcome::Consumed
    }

    fn history_next(&mut self) -> EditorOutcome {
        if self.history_offset == 0 {
            return EditorOutcome::Consumed;
        }
        self.history_offset -= 1;
        if self.history_offset == 0 {
            let draft = std::mem::take(&mut self.live_draft);
            self.set_buffer(draft);
        } else {
            self.show_history_entry();
        }
        EditorOutcome::Consumed
    }

    fn show_history_entry(&mut self) {
        let entry = self
            .history
            .nth_most_recent(self.history_offset)
            .unwrap_or_default()
            .to_string();
        self.buffer = entry;
        self.cursor = char_count(&self.buffer);
    }

    fn detach_history(&mut self) {
        if self.history_offset > 0 {
            self.history_offset = 0;
            self.live_draft.clear();
        }
    }

    fn set_buffer(&mut self, text: String) {
        self.buffer = text;
        self.cursor = char_count(&self.buffer);
        self.history_offset = 0;
    }

    /// Render the prompt row and return it with the cursor column.
    pub fn view(&self) -> (Line, usize) {
        match &self.mode {
            EditorMode::Normal => {
                let prompt = settings::prompt_text(&self.prompt);
                let cursor_col = char_count(&prompt) + self.cursor;
                let mut line = Line::styled(prompt, SpanStyle::Prompt);
                line.push(Span::plain(self.buffer.clone()));
                if let Some(hint) = self.completion_hint() {
                    line.push(Span::new(hint, SpanStyle::Dim));
                }
                (line, cursor_col)
            }
            EditorMode::ReverseSearch(search) => {
                let label = format!("{}'{}': ", settings::SEARCH_PROMPT_LABEL, search.query);
                let cursor_col = char_count(settings::SEARCH_PROMPT_LABEL)
                    + 1
                    + char_count(&search.query);
                let mut line = Line::styled(label, SpanStyle::Prompt);
                line.push(Span::plain(search.current().unwrap_or_default()));
                if search.matches.len() > 1 {
                    line.push(Span::new(
                        format!("  [{}/{}]", search.selected + 1, search.matches.len()),
                        SpanStyle::Dim,
                    ));
                }
                (line, cursor_col)
            }
        }
    }
}

enum SearchOutcome {
    Stay,
    Commit(String),
    Cancel,
}

fn handle_search_key(search: &mut ReverseSearch, history: &History, key: &KeyEvent) -> SearchOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Enter => SearchOutcome::Commit(search.current().unwrap_or_default().to_string()),
        KeyCode::Esc => SearchOutcome::Cancel,
        KeyCode::Char('g') | KeyCode::Char('c') if ctrl => SearchOutcome::Cancel,
        KeyCode::Char('r') if ctrl => {
            search.advance();
            SearchOutcome::Stay
        }
        KeyCode::Backspace => {
            search.query.pop();
            search.recompute(history);
            SearchOutcome::Stay
        }
        KeyCode::Char(ch) if !ctrl && !alt => {
            search.query.push(ch);
            search.recompute(history);
            SearchOutcome::Stay
        }
        _ => SearchOutcome::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(editor: &mut LineEditor, text: &str) {
        for ch in text.chars() {
            editor.handle_key(&key(KeyCode::Char(ch)));
        }
    }

    fn editor_with(entries: &[&str]) -> LineEditor {
        let mut history = History::new();
        for entry in entries {
            history.push(*entry);
        }
        LineEditor::new("replkit >", history)
    }

    #[test]
    fn enter_submits_and_clears_buffer() {
        let mut editor = editor_with(&[]);
        type_str(&mut editor, "test");
        assert_eq!(
            editor.handle_key(&key(KeyCode::Enter)),
            EditorOutcome::Submitted("test".into())
        );
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn enter_on_empty_buffer_does_not_submit() {
        let mut editor = editor_with(&[]);
        assert_eq!(editor.handle_key(&key(KeyCode::Enter)), EditorOutcome::Consumed);
    }

    #[test]
    fn history_navigation_round_trips_to_live_buffer() {
        // Up N times then Down N times restores the draft.
        let mut editor = editor_with(&["one", "two", "three"]);
        type_str(&mut editor, "dra");
        for _ in 0..3 {
            editor.handle_key(&key(KeyCode::Up));
        }
        assert_eq!(editor.buffer(), "one");
        assert_eq!(editor.history_offset(), 3);
        for _ in 0..3 {
            editor.handle_key(&key(KeyCode::Down));
        }
        assert_eq!(editor.buffer(), "dra");
        assert_eq!(editor.history_offset(), 0);
    }

    #[test]
    fn history_offset_is_clamped() {
        let mut editor = editor_with(&["only"]);
        editor.handle_key(&key(KeyCode::Down));
        assert_eq!(editor.history_offset(), 0);
        editor.handle_key(&key(KeyCode::Up));
        editor.handle_key(&key(KeyCode::Up));
        assert_eq!(editor.history_offset(), 1);
        assert_eq!(editor.buffer(), "only");
    }

    #[test]
    fn editing_a_history_entry_makes_it_live() {
        let mut editor = editor_with(&["foo", "bar"]);
        editor.handle_key(&key(KeyCode::Up));
        type_str(&mut editor, "x");
        assert_eq!(editor.history_offset(), 0);
        assert_eq!(editor.buffer(), "barx");
        // Down at offset 0 keeps the edited text.
        editor.handle_key(&key(KeyCode::Down));
        assert_eq!(editor.buffer(), "barx");
    }

    #[test]
    fn reverse_search_orders_matches_most_recent_first() {
        let mut editor = editor_with(&["foo", "foobar", "baz"]);
        editor.handle_key(&ctrl('r'));
        type_str(&mut editor, "foo");
        let EditorMode::ReverseSearch(search) = editor.mode() else {
            panic!("expected reverse search");
        };
        assert_eq!(search.matches, vec!["foobar", "foo"]);
        assert_eq!(search.selected, 0);
    }

    #[test]
    fn reverse_search_repeat_is_clamped_and_enter_commits() {
        let mut editor = editor_with(&["foo", "foobar", "baz"]);
        editor.handle_key(&ctrl('r'));
        type_str(&mut editor, "foo");
        editor.handle_key(&ctrl('r'));
        editor.handle_key(&ctrl('r'));
        let EditorMode::ReverseSearch(search) = editor.mode() else {
            panic!("expected reverse search");
        };
        assert_eq!(search.selected, 1);

        editor.handle_key(&key(KeyCode::Enter));
        assert!(!editor.is_searching());
        assert_eq!(editor.buffer(), "foo");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn reverse_search_backspace_to_empty_clears_matches() {
        let mut editor = editor_with(&["foo"]);
        editor.handle_key(&ctrl('r'));
        type_str(&mut editor, "f");
        editor.handle_key(&key(KeyCode::Backspace));
        let EditorMode::ReverseSearch(search) = editor.mode() else {
            panic!("expected reverse search");
        };
        assert!(search.matches.is_empty());
        assert_eq!(search.selected, 0);

        // Committing with no match yields an empty buffer.
        editor.handle_key(&key(KeyCode::Enter));
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn reverse_search_cancel_keeps_buffer() {
        let mut editor = editor_with(&["foo"]);
        type_str(&mut editor, "keep");
        editor.handle_key(&ctrl('r'));
        type_str(&mut editor, "fo");
        editor.handle_key(&key(KeyCode::Esc));
        assert!(!editor.is_searching());
        assert_eq!(editor.buffer(), "keep");

        editor.handle_key(&ctrl('r'));
        editor.handle_key(&ctrl('g'));
        assert!(!editor.is_searching());
    }

    #[test]
    fn suggestions_merge_history_then_interpreter() {
        let mut editor = editor_with(&["lista", "test"]);
        editor.refresh_suggestions(vec!["test".into(), "error".into()]);
        assert_eq!(editor.suggestions(), &["test", "lista", "error"]);
    }

    #[test]
    fn tab_accepts_completion_hint() {
        let mut editor = editor_with(&[]);
        type_str(&mut editor, "li");
        editor.refresh_suggestions(vec!["lista".into()]);
        assert_eq!(editor.completion_hint(), Some("sta"));
        editor.handle_key(&key(KeyCode::Tab));
        assert_eq!(editor.buffer(), "lista");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn ctrl_c_clears_line() {
        let mut editor = editor_with(&[]);
        type_str(&mut editor, "abc");
        editor.handle_key(&ctrl('c'));
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn view_places_cursor_after_prompt() {
        let mut editor = editor_with(&[]);
        type_str(&mut editor, "ab");
        editor.handle_key(&key(KeyCode::Left));
        let (line, col) = editor.view();
        assert_eq!(line.text(), "replkit > ab");
        assert_eq!(col, 11);
    }

    #[test]
    fn modified_chars_are_ignored() {
        let mut editor = editor_with(&[]);
        let outcome = editor.handle_key(&ctrl('d'));
        assert_eq!(outcome, EditorOutcome::Ignored);
        assert_eq!(editor.buffer(), "");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn history_navigation_round_trips_to_draft(
                entries in proptest::collection::vec("[a-z]{1,8}", 1..12),
                draft in "[a-z ]{0,10}",
                ups in 0usize..20,
            ) {
                let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
                let mut editor = editor_with(&refs);
                type_str(&mut editor, &draft);
                for _ in 0..ups {
                    editor.handle_key(&key(KeyCode::Up));
                }
                // Up is clamped at the oldest entry.
                let steps = ups.min(entries.len());
                if steps > 0 {
                    prop_assert_eq!(editor.buffer(), entries[entries.len() - steps].as_str());
                }
                for _ in 0..steps {
                    editor.handle_key(&key(KeyCode::Down));
                }
                prop_assert_eq!(editor.buffer(), draft.as_str());
            }
        }
    }
}
