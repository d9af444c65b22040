//! Backend-neutral description of the live region below the scrollback.
//!
//! The engine builds a [`Frame`] from its state; a renderer decides how the
//! styles map to terminal colors. Keeping this plain data makes widget output
//! comparable in tests.

use crate::tui::settings;

/// Semantic style for one run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Prompt,
    /// Ghost completion and secondary hints.
    Dim,
    Selected,
    Header,
    Status,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }
}

/// One terminal row made of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::plain(text)],
        }
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            spans: vec![Span::new(text, style)],
        }
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Concatenated text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }
}

/// Full live-region contents plus where the terminal cursor should rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
    /// `(row, col)` relative to the first line; `None` hides the cursor.
    pub cursor: Option<(usize, usize)>,
}

impl Frame {
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
    }

    /// Plain text of every line joined with `\n`, no trailing newline.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Content appended above the live region. Once printed it is never redrawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollbackEntry {
    /// A submitted line, shown as `<prompt> <line>`.
    Echo { prompt: String, line: String },
    /// Interpreter text output, printed unmodified.
    Text(String),
    /// Error notice.
    Error(String),
    /// A widget view flushed from the live region.
    Lines(Vec<Line>),
}

impl ScrollbackEntry {
    pub fn lines(&self) -> Vec<Line> {
        match self {
            Self::Echo { prompt, line } => {
                let mut out = Line::styled(settings::prompt_text(prompt), SpanStyle::Prompt);
                out.push(Span::plain(line.clone()));
                vec![out]
            }
            Self::Text(text) if text.is_empty() => vec![Line::default()],
            Self::Text(text) => text.lines().map(Line::plain).collect(),
            Self::Error(message) => vec![Line::styled(
                format!("{}{message}", settings::ERROR_PREFIX),
                SpanStyle::Error,
            )],
            Self::Lines(lines) => lines.clone(),
        }
    }

    /// Unstyled rendering, one `\n` after every line.
    pub fn plain_text(&self) -> String {
        lines_to_text(&self.lines())
    }
}

/// Join plain lines as they are written to files and non-interactive output.
pub fn lines_to_text(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.text());
        out.push('\n');
    }
    out
}
