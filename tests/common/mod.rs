//! Shared harness for integration tests: a scripted interpreter, a recording
//! render sink, and helpers to drive an [`EventLoop`] from a test task.

#![allow(dead_code)]

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use replkit::engine::{EngineEvent, EngineOptions, ReplEngine};
use replkit::tui::{Frame, History, RenderSink, ScrollbackEntry};
use replkit::{CommandResult, Interpreter, InterpreterError};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::UnboundedSender;

pub const PROMPT: &str = "replkit >";
const WAIT_LIMIT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Canned results keyed by command; unknown commands yield `Empty`.
#[derive(Default)]
pub struct ScriptedInterpreter {
    results: HashMap<String, Result<CommandResult, InterpreterError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, command: &str, result: CommandResult) -> Self {
        self.results.insert(command.to_string(), Ok(result));
        self
    }

    pub fn with_error(mut self, command: &str, message: &str) -> Self {
        self.results
            .insert(command.to_string(), Err(InterpreterError::new(message)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Interpreter for ScriptedInterpreter {
    async fn exec(&self, command: &str) -> Result<CommandResult, InterpreterError> {
        self.calls.lock().unwrap().push(command.to_string());
        self.results
            .get(command)
            .cloned()
            .unwrap_or(Ok(CommandResult::Empty))
    }

    fn suggest(&self, partial_input: &str) -> Vec<String> {
        self.results
            .keys()
            .filter(|name| name.starts_with(partial_input))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Render sink
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Recording {
    pub scrollback: Vec<String>,
    pub frames: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub finished: bool,
}

/// [`RenderSink`] capturing plain text; clones share one recording so a test
/// can observe output while the loop owns the sink.
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrollback(&self) -> Vec<String> {
        self.inner.lock().unwrap().scrollback.clone()
    }

    pub fn last_frame(&self) -> String {
        self.inner
            .lock()
            .unwrap()
            .frames
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn stdout(&self) -> String {
        self.inner.lock().unwrap().stdout.clone()
    }

    pub fn stderr(&self) -> String {
        self.inner.lock().unwrap().stderr.clone()
    }

    pub fn finished(&self) -> bool {
        self.inner.lock().unwrap().finished
    }
}

impl RenderSink for RecordingSink {
    fn scrollback(&mut self, entry: &ScrollbackEntry) -> io::Result<()> {
        self.inner.lock().unwrap().scrollback.push(entry.plain_text());
        Ok(())
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        self.inner.lock().unwrap().frames.push(frame.text());
        Ok(())
    }

    fn stdout(&mut self, text: &str) -> io::Result<()> {
        self.inner.lock().unwrap().stdout.push_str(text);
        Ok(())
    }

    fn stderr(&mut self, text: &str) -> io::Result<()> {
        self.inner.lock().unwrap().stderr.push_str(text);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.lock().unwrap().finished = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Engine construction and input
// ---------------------------------------------------------------------------

pub fn engine(
    interpreter: Arc<dyn Interpreter>,
    history: History,
    history_file: Option<PathBuf>,
    non_interactive: Option<&str>,
) -> ReplEngine {
    ReplEngine::new(
        interpreter,
        EngineOptions {
            prompt: PROMPT.to_string(),
            history,
            history_file,
            width: 80,
            height: 24,
            non_interactive: non_interactive.map(str::to_string),
        },
    )
}

pub fn key(code: KeyCode) -> EngineEvent {
    EngineEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl(ch: char) -> EngineEvent {
    EngineEvent::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

/// Type `text` and press Enter.
pub fn submit(tx: &UnboundedSender<EngineEvent>, text: &str) {
    for ch in text.chars() {
        tx.send(key(KeyCode::Char(ch))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
}

/// Poll until `check` holds; panics after a few seconds.
pub async fn wait_until<F>(what: &str, mut check: F)
where
    F: FnMut() -> bool,
{
    let waited = tokio::time::timeout(WAIT_LIMIT, async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for {what}");
}

// ---------------------------------------------------------------------------
// Temp dirs
// ---------------------------------------------------------------------------

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let path = std::env::temp_dir().join(format!(
            "replkit-it-{prefix}-{}-{millis}-{}",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn child(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
