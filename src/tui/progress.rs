//! Spinner state for the "command running" liveness indicator.
//!
//! The spinner is advanced by tick events from the event loop rather than by
//! its own thread, so it never writes to the terminal behind the renderer.

use crate::tui::frame::{Line, Span, SpanStyle};
use crate::tui::settings;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Spinner {
    label: String,
    frame: usize,
    started_at: Instant,
}

impl Spinner {
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frame: 0,
            started_at: Instant::now(),
        }
    }

    /// Move to the next animation frame.
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn current_frame(&self) -> char {
        settings::PROGRESS_FRAMES[self.frame % settings::PROGRESS_FRAMES.len()]
    }

    pub fn line(&self) -> Line {
        progress_line(self.current_frame(), &self.label, self.started_at.elapsed())
    }
}

fn progress_line(frame: char, label: &str, elapsed: Duration) -> Line {
    // Keep elapsed formatting stable so tests can assert deterministic text.
    let elapsed_s = elapsed.as_millis() as f64 / 1000.0;
    let mut line = Line::styled(format!("[{frame}] "), SpanStyle::Status);
    line.push(Span::new(format!("{label} ({elapsed_s:.1}s)"), SpanStyle::Dim));
    line
}
