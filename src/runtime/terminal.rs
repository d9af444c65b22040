//! Terminal input plumbing: raw mode and the blocking key reader thread.

use crate::engine::EngineEvent;
use crate::tui::settings;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Raw mode lifetime guard so terminal state is restored on any return path.
pub(crate) struct RawModeGuard;

impl RawModeGuard {
    /// Enable terminal raw mode and return a guard that disables it on drop.
    pub(crate) fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Background thread translating crossterm events into engine events.
///
/// `crossterm::event::read` blocks, so it lives on its own OS thread and polls
/// with a short timeout to notice the stop flag.
pub(crate) struct InputReader {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl InputReader {
    pub(crate) fn spawn(tx: mpsc::UnboundedSender<EngineEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let poll = Duration::from_millis(settings::REPL_EVENT_POLL_MS);
            while !stop_flag.load(Ordering::Relaxed) {
                match event::poll(poll) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(err) => {
                        warn!(error = %err, "terminal poll failed");
                        let _ = tx.send(EngineEvent::InputFailed(err));
                        break;
                    }
                }
                let translated = match event::read() {
                    Ok(evt) => translate(evt),
                    Err(err) => {
                        warn!(error = %err, "terminal read failed");
                        let _ = tx.send(EngineEvent::InputFailed(err));
                        break;
                    }
                };
                if let Some(engine_event) = translated {
                    if tx.send(engine_event).is_err() {
                        break;
                    }
                }
            }
            debug!("input reader stopped");
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub(crate) fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

fn translate(evt: Event) -> Option<EngineEvent> {
    match evt {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(EngineEvent::Key(key)),
        Event::Resize(width, height) => Some(EngineEvent::Resize { width, height }),
        _ => None,
    }
}

/// Terminal size, or the fallback when no terminal is attached.
pub fn terminal_size() -> (u16, u16) {
    terminal::size()
        .ok()
        .filter(|(w, h)| *w > 0 && *h > 0)
        .unwrap_or((settings::FALLBACK_COLUMNS, settings::FALLBACK_ROWS))
}
