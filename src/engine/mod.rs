//! The REPL interaction state machine.
//!
//! [`ReplEngine::handle`] consumes exactly one [`EngineEvent`] and returns the
//! [`Effect`]s the event loop must carry out. The engine itself performs no
//! I/O and never blocks, so every transition can be driven from tests.
//!
//! State overview:
//!
//! ```text
//! ReadingInput ──Enter──▶ ExecutingCommand ──Simple/Empty/Error/SaveTo──▶ ReadingInput
//!                               │
//!                               └─List/Table─▶ ReadingInputWith{List,Table}
//!                                                 │  ▲
//!                                          focus  ▼  │ unfocus
//!                                        {List,Table}Interaction ──select──▶ ExecutingCommand
//! ```

mod events;
mod result_widget;

pub use events::{Effect, EngineEvent, EngineState};
pub use result_widget::{render_static, ResultWidget};

use crate::error::{InterpreterError, PersistenceError};
use crate::interpreter::{CommandResult, Interpreter};
use crate::tui::progress::Spinner;
use crate::tui::{
    settings, EditorOutcome, Frame, History, Line, LineEditor, ListWidget, ScrollbackEntry,
    SpanStyle, TableWidget, WidgetOutcome,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Construction parameters for [`ReplEngine`].
pub struct EngineOptions {
    pub prompt: String,
    pub history: History,
    /// Append-only log mirroring submitted lines.
    pub history_file: Option<PathBuf>,
    pub width: u16,
    pub height: u16,
    /// Single command to run instead of an interactive session.
    pub non_interactive: Option<String>,
}

pub struct ReplEngine {
    interpreter: Arc<dyn Interpreter>,
    editor: LineEditor,
    state: EngineState,
    widget: Option<ResultWidget>,
    width: usize,
    height: usize,
    history_file: Option<PathBuf>,
    non_interactive: Option<String>,
    spinner: Option<Spinner>,
    exit_code: Option<i32>,
}

impl ReplEngine {
    pub fn new(interpreter: Arc<dyn Interpreter>, options: EngineOptions) -> Self {
        let state = if options.non_interactive.is_some() {
            EngineState::NonInteractive
        } else {
            EngineState::ReadingInput
        };
        Self {
            interpreter,
            editor: LineEditor::new(options.prompt, options.history),
            state,
            widget: None,
            width: options.width as usize,
            height: options.height as usize,
            history_file: options.history_file,
            non_interactive: options.non_interactive,
            spinner: None,
            exit_code: None,
        }
    }

    /// Effects to perform before the first event arrives.
    pub fn start(&mut self) -> Vec<Effect> {
        match self.non_interactive.clone() {
            Some(command) => {
                info!(command = %command, "running non-interactive command");
                vec![Effect::Execute(command)]
            }
            None => {
                self.refresh_suggestions();
                Vec::new()
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn history(&self) -> &[String] {
        self.editor.history().entries()
    }

    pub fn widget(&self) -> Option<&ResultWidget> {
        self.widget.as_ref()
    }

    /// Exit status once a terminating effect has been emitted.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn is_executing(&self) -> bool {
        self.state == EngineState::ExecutingCommand
    }

    pub fn handle(&mut self, event: EngineEvent) -> Vec<Effect> {
        if self.exit_code.is_some() {
            return Vec::new();
        }
        match event {
            EngineEvent::Key(key) => self.handle_key(key),
            EngineEvent::Resize { width, height } => {
                self.width = width as usize;
                self.height = height as usize;
                if let Some(widget) = &mut self.widget {
                    widget.resize(self.width, self.height);
                }
                Vec::new()
            }
            EngineEvent::Tick => {
                if let Some(spinner) = &mut self.spinner {
                    spinner.advance();
                }
                Vec::new()
            }
            EngineEvent::CommandCompleted(result) => self.complete(result),
            EngineEvent::PersistenceFailed(err) => {
                warn!(error = %err, "history append failed");
                vec![Effect::Print(ScrollbackEntry::Error(err.to_string()))]
            }
            EngineEvent::SaveFinished(result) => self.save_finished(result),
            EngineEvent::InputFailed(err) => {
                warn!(error = %err, "terminal input failed");
                let mut effects = vec![Effect::Print(ScrollbackEntry::Error(format!(
                    "terminal input failed: {err}"
                )))];
                effects.extend(self.exit(1));
                effects
            }
        }
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        if self.state == EngineState::NonInteractive {
            return Vec::new();
        }
        if is_ctrl(&key, 'd') {
            info!(state = %self.state, "session terminated");
            return self.exit(0);
        }
        match self.state {
            EngineState::ExecutingCommand | EngineState::NonInteractive => Vec::new(),
            EngineState::ListInteraction | EngineState::TableInteraction => {
                self.handle_widget_key(key)
            }
            EngineState::ReadingInput
            | EngineState::ReadingInputWithList
            | EngineState::ReadingInputWithTable => self.handle_input_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.widget.is_some() && !self.editor.is_searching() {
            if is_focus_key(&key) {
                return self.focus_widget();
            }
            if key.code == KeyCode::Esc {
                return self.dismiss_widget();
            }
        }

        match self.editor.handle_key(&key) {
            EditorOutcome::Submitted(line) => self.submit(line),
            EditorOutcome::Consumed | EditorOutcome::Ignored => {
                if !self.editor.is_searching() {
                    self.refresh_suggestions();
                }
                Vec::new()
            }
        }
    }

    fn handle_widget_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(widget) = &mut self.widget else {
            // Interaction state without a widget cannot be reached; recover.
            self.transition(EngineState::ReadingInput);
            return Vec::new();
        };

        let quit = key.code == KeyCode::Char('q')
            && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && !widget.is_editing_filter();
        if quit || is_unfocus_key(&key) {
            widget.set_interactive(false);
            let next = self.reading_state();
            self.transition(next);
            return Vec::new();
        }

        match widget.handle_key(&key) {
            WidgetOutcome::Selected(selection) => {
                debug!(?selection, "widget selection confirmed");
                let echoed = widget.view();
                self.widget = None;
                self.begin_execution();
                vec![
                    Effect::Print(ScrollbackEntry::Lines(echoed)),
                    Effect::Select(selection),
                ]
            }
            WidgetOutcome::Updated | WidgetOutcome::Ignored => Vec::new(),
        }
    }

    fn focus_widget(&mut self) -> Vec<Effect> {
        let next = match &mut self.widget {
            Some(ResultWidget::List(list)) => {
                list.set_interactive(true);
                EngineState::ListInteraction
            }
            Some(ResultWidget::Table(table)) => {
                table.set_interactive(true);
                EngineState::TableInteraction
            }
            None => return Vec::new(),
        };
        self.transition(next);
        Vec::new()
    }

    /// Print the unused widget's current view and drop it.
    fn flush_widget(&mut self) -> Option<Effect> {
        let widget = self.widget.take()?;
        Some(Effect::Print(ScrollbackEntry::Lines(widget.view())))
    }

    fn dismiss_widget(&mut self) -> Vec<Effect> {
        let effects = self.flush_widget().into_iter().collect();
        self.transition(EngineState::ReadingInput);
        effects
    }

    fn submit(&mut self, line: String) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self.flush_widget().into_iter().collect();
        effects.push(Effect::Print(ScrollbackEntry::Echo {
            prompt: self.editor.prompt().to_string(),
            line: line.clone(),
        }));

        self.editor.record(&line);
        if let Some(path) = &self.history_file {
            effects.push(Effect::AppendHistory {
                path: path.clone(),
                line: line.clone(),
            });
        }

        debug!(command = %line, "submitting command");
        self.begin_execution();
        self.refresh_suggestions();
        effects.push(Effect::Execute(line));
        effects
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    fn complete(&mut self, result: Result<CommandResult, InterpreterError>) -> Vec<Effect> {
        self.spinner = None;
        if self.state == EngineState::NonInteractive {
            return self.complete_non_interactive(result);
        }
        if self.state != EngineState::ExecutingCommand {
            warn!(state = %self.state, "completion arrived while not executing");
        }

        match result {
            Ok(result) => {
                debug!(kind = result.kind(), "command completed");
                self.apply_result(result)
            }
            Err(err) => {
                debug!(error = %err, "command failed");
                self.widget = None;
                self.transition(EngineState::ReadingInput);
                vec![Effect::Print(ScrollbackEntry::Error(err.to_string()))]
            }
        }
    }

    fn apply_result(&mut self, result: CommandResult) -> Vec<Effect> {
        match result {
            CommandResult::Empty => {
                self.widget = None;
                self.transition(EngineState::ReadingInput);
                Vec::new()
            }
            CommandResult::Simple(text) => {
                self.widget = None;
                self.transition(EngineState::ReadingInput);
                vec![Effect::Print(ScrollbackEntry::Text(text))]
            }
            CommandResult::List { items, on_select } => {
                let list = ListWidget::new(items, on_select, self.width, self.height);
                self.widget = Some(ResultWidget::List(list));
                self.transition(EngineState::ReadingInputWithList);
                Vec::new()
            }
            CommandResult::Table { rows, on_select } => {
                let table = TableWidget::new(rows, on_select, self.width, self.height);
                self.widget = Some(ResultWidget::Table(table));
                self.transition(EngineState::ReadingInputWithTable);
                Vec::new()
            }
            CommandResult::SaveTo { path, result } => {
                self.widget = None;
                self.transition(EngineState::ReadingInput);
                match self.save_effect(path, &result) {
                    Ok(effect) => vec![effect],
                    Err(message) => vec![Effect::Print(ScrollbackEntry::Error(message))],
                }
            }
        }
    }

    fn complete_non_interactive(
        &mut self,
        result: Result<CommandResult, InterpreterError>,
    ) -> Vec<Effect> {
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                return self.fail_non_interactive(err.to_string());
            }
        };
        match result {
            CommandResult::Empty => self.exit(0),
            CommandResult::Simple(text) => {
                let mut effects = vec![Effect::Stdout(format!("{text}\n"))];
                effects.extend(self.exit(0));
                effects
            }
            other @ (CommandResult::List { .. } | CommandResult::Table { .. }) => {
                let mut effects = vec![Effect::Stdout(render_static(&other, self.width))];
                effects.extend(self.exit(0));
                effects
            }
            CommandResult::SaveTo { path, result } => match self.save_effect(path, &result) {
                // Exit once the write reports back.
                Ok(effect) => vec![effect],
                Err(message) => self.fail_non_interactive(message),
            },
        }
    }

    fn fail_non_interactive(&mut self, message: String) -> Vec<Effect> {
        let mut effects = vec![Effect::Stderr(format!(
            "{}{message}\n",
            settings::ERROR_PREFIX
        ))];
        effects.extend(self.exit(1));
        effects
    }

    fn save_effect(&self, path: PathBuf, result: &CommandResult) -> Result<Effect, String> {
        if path.as_os_str().is_empty() {
            return Err("save: empty target path".to_string());
        }
        Ok(Effect::WriteFile {
            path,
            content: render_static(result, self.width),
        })
    }

    fn save_finished(&mut self, result: Result<PathBuf, PersistenceError>) -> Vec<Effect> {
        let non_interactive = self.state == EngineState::NonInteractive;
        match result {
            Ok(path) => {
                debug!(path = %path.display(), "saved command result");
                if non_interactive {
                    self.exit(0)
                } else {
                    Vec::new()
                }
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                if non_interactive {
                    self.fail_non_interactive(err.to_string())
                } else {
                    vec![Effect::Print(ScrollbackEntry::Error(err.to_string()))]
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn begin_execution(&mut self) {
        self.spinner = Some(Spinner::start(settings::EXECUTING_LABEL));
        self.transition(EngineState::ExecutingCommand);
    }

    fn exit(&mut self, code: i32) -> Vec<Effect> {
        self.exit_code = Some(code);
        vec![Effect::Exit(code)]
    }

    fn reading_state(&self) -> EngineState {
        match self.widget {
            Some(ResultWidget::List(_)) => EngineState::ReadingInputWithList,
            Some(ResultWidget::Table(_)) => EngineState::ReadingInputWithTable,
            None => EngineState::ReadingInput,
        }
    }

    fn transition(&mut self, next: EngineState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "state transition");
            self.state = next;
        }
    }

    fn refresh_suggestions(&mut self) {
        let suggestions = self.interpreter.suggest(self.editor.buffer());
        self.editor.refresh_suggestions(suggestions);
    }

    /// Live region for the current state.
    pub fn view(&self) -> Frame {
        let mut frame = Frame::default();
        if self.state == EngineState::NonInteractive || self.exit_code.is_some() {
            return frame;
        }

        if let Some(widget) = &self.widget {
            frame.extend(widget.view());
            let help = match widget {
                ResultWidget::List(_) if widget.is_interactive() => settings::HELP_LIST_FOCUSED,
                ResultWidget::Table(_) if widget.is_interactive() => settings::HELP_TABLE_FOCUSED,
                _ => settings::HELP_WIDGET_UNFOCUSED,
            };
            frame.push(Line::styled(format!("{}{help}", settings::ROW_GUTTER), SpanStyle::Dim));
        }

        match self.state {
            EngineState::ExecutingCommand => {
                if let Some(spinner) = &self.spinner {
                    frame.push(spinner.line());
                }
            }
            EngineState::ListInteraction | EngineState::TableInteraction => {
                let (line, _) = self.editor.view();
                frame.push(line);
            }
            _ => {
                let (line, col) = self.editor.view();
                frame.cursor = Some((frame.lines.len(), col));
                frame.push(line);
            }
        }
        frame
    }
}

fn is_ctrl(key: &KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(ch)
}

fn is_focus_key(key: &KeyEvent) -> bool {
    (key.code == KeyCode::Up && key.modifiers.contains(KeyModifiers::CONTROL)) || is_ctrl(key, 'k')
}

fn is_unfocus_key(key: &KeyEvent) -> bool {
    (key.code == KeyCode::Down && key.modifiers.contains(KeyModifiers::CONTROL))
        || is_ctrl(key, 'j')
        || is_ctrl(key, 'c')
}
