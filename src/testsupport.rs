//! Shared test fixtures for engine, history, and config test modules.

use crate::error::InterpreterError;
use crate::interpreter::{CommandResult, Interpreter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "replkit-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Interpreter returning canned results per command and recording calls.
#[derive(Default)]
pub struct ScriptedInterpreter {
    results: HashMap<String, Result<CommandResult, InterpreterError>>,
    suggestions: Vec<String>,
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

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Commands passed to `exec`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Interpreter for ScriptedInterpreter {
    async fn exec(&self, command: &str) -> Result<CommandResult, InterpreterError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.to_string());
        }
        match self.results.get(command) {
            Some(result) => result.clone(),
            None => Ok(CommandResult::Empty),
        }
    }

    fn suggest(&self, partial_input: &str) -> Vec<String> {
        self.suggestions
            .iter()
            .filter(|s| s.starts_with(partial_input))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn scripted_interpreter_replays_results() {
        let interp = ScriptedInterpreter::new()
            .with_result("test", CommandResult::simple("ok"))
            .with_error("error", "boom")
            .with_suggestions(&["test", "lista"]);

        assert!(matches!(
            interp.exec("test").await,
            Ok(CommandResult::Simple(text)) if text == "ok"
        ));
        assert_eq!(interp.exec("error").await.unwrap_err().message(), "boom");
        assert!(matches!(interp.exec("other").await, Ok(CommandResult::Empty)));
        assert_eq!(interp.calls(), vec!["test", "error", "other"]);
        assert_eq!(interp.suggest("li"), vec!["lista"]);
    }
}
