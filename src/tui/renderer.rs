//! Terminal painter for the scrollback and the live region below it.
//!
//! Scrollback entries are printed once and scroll with the terminal. The live
//! region (prompt, widget, spinner) is repainted in place: move the cursor back
//! to the top of the previous frame, clear to the end of the screen, and draw
//! the new frame.

use crate::tui::frame::{Frame, Line, ScrollbackEntry, SpanStyle};
use crate::tui::settings;
use crate::tui::text::wrapped_rows;
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::style::{Print, PrintStyledContent, StyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Output surface driven by the event loop.
///
/// The terminal implementation lives below; tests substitute a recording sink.
pub trait RenderSink {
    /// Append one entry above the live region.
    fn scrollback(&mut self, entry: &ScrollbackEntry) -> io::Result<()>;
    /// Replace the live region with `frame`.
    fn draw(&mut self, frame: &Frame) -> io::Result<()>;
    /// Program output of a non-interactive run.
    fn stdout(&mut self, text: &str) -> io::Result<()>;
    /// Diagnostics of a non-interactive run.
    fn stderr(&mut self, text: &str) -> io::Result<()>;
    /// Clear the live region and leave the terminal tidy.
    fn finish(&mut self) -> io::Result<()>;
}

/// [`RenderSink`] painting to real terminal streams.
pub struct TerminalRenderer<O: Write, E: Write> {
    out: O,
    err: E,
    color: bool,
    /// Row of the cursor within the last painted frame.
    previous_cursor_row: usize,
    cursor_hidden: bool,
}

impl TerminalRenderer<io::Stdout, io::Stderr> {
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), color)
    }
}

impl<O: Write, E: Write> TerminalRenderer<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self {
            out,
            err,
            color,
            previous_cursor_row: 0,
            cursor_hidden: false,
        }
    }

    /// Consume the renderer and hand back its writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn clear_live(&mut self) -> io::Result<()> {
        if self.previous_cursor_row > 0 {
            self.out.queue(MoveUp(self.previous_cursor_row as u16))?;
        }
        self.out.queue(MoveToColumn(0))?;
        self.out.queue(Clear(ClearType::FromCursorDown))?;
        self.previous_cursor_row = 0;
        Ok(())
    }

    fn write_line(&mut self, line: &Line) -> io::Result<()> {
        for span in &line.spans {
            if span.text.is_empty() {
                continue;
            }
            match styled(&span.text, span.style, self.color) {
                Some(content) => self.out.queue(PrintStyledContent(content))?,
                None => self.out.queue(Print(span.text.as_str()))?,
            };
        }
        Ok(())
    }
}

impl<O: Write, E: Write> RenderSink for TerminalRenderer<O, E> {
    fn scrollback(&mut self, entry: &ScrollbackEntry) -> io::Result<()> {
        self.clear_live()?;
        for line in entry.lines() {
            self.write_line(&line)?;
            self.out.queue(Print("\r\n"))?;
        }
        self.out.flush()
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.clear_live()?;
        let cols = terminal_columns();

        let mut row_starts = Vec::with_capacity(frame.lines.len());
        let mut total_rows = 0usize;
        for (idx, line) in frame.lines.iter().enumerate() {
            if idx > 0 {
                self.out.queue(Print("\r\n"))?;
            }
            row_starts.push(total_rows);
            total_rows += wrapped_rows(line.width(), cols);
            self.write_line(line)?;
        }
        let bottom_row = total_rows.saturating_sub(1);

        match frame.cursor {
            Some((row, col)) if row < row_starts.len() => {
                let cursor_row = row_starts[row] + col / cols.max(1);
                let up = bottom_row.saturating_sub(cursor_row);
                if up > 0 {
                    self.out.queue(MoveUp(up as u16))?;
                }
                self.out.queue(MoveToColumn((col % cols.max(1)) as u16))?;
                if self.cursor_hidden {
                    self.out.queue(Show)?;
                    self.cursor_hidden = false;
                }
                self.previous_cursor_row = cursor_row;
            }
            _ => {
                if !self.cursor_hidden {
                    self.out.queue(Hide)?;
                    self.cursor_hidden = true;
                }
                self.previous_cursor_row = bottom_row;
            }
        }
        self.out.flush()
    }

    fn stdout(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn stderr(&mut self, text: &str) -> io::Result<()> {
        self.err.write_all(text.as_bytes())?;
        self.err.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.clear_live()?;
        if self.cursor_hidden {
            self.out.queue(Show)?;
            self.cursor_hidden = false;
        }
        self.out.flush()
    }
}

fn styled(text: &str, style: SpanStyle, color: bool) -> Option<StyledContent<&str>> {
    if !color {
        return match style {
            SpanStyle::Selected => Some(text.reverse()),
            _ => None,
        };
    }
    let content = match style {
        SpanStyle::Plain => return None,
        SpanStyle::Prompt => text.with(settings::COLOR_PROMPT),
        SpanStyle::Dim => text.with(settings::COLOR_SUGGESTION),
        SpanStyle::Selected => text
            .with(settings::COLOR_SELECTED_FG)
            .on(settings::COLOR_SELECTED_BG),
        SpanStyle::Header => text.with(settings::COLOR_HEADER).bold(),
        SpanStyle::Status => text.with(settings::COLOR_STATUS_LINE),
        SpanStyle::Error => text.with(settings::COLOR_ERROR),
    };
    Some(content)
}

/// Current terminal width, or the fallback when it cannot be queried.
pub fn terminal_columns() -> usize {
    terminal::size()
        .map(|(cols, _)| cols as usize)
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(settings::FALLBACK_COLUMNS as usize)
}
