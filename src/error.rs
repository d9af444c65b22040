//! Unified error types for the REPL engine.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// InterpreterError
// ---------------------------------------------------------------------------

/// Descriptive failure raised by an embedding application's interpreter.
///
/// These are always recovered: the engine renders an error notice and goes
/// back to reading input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterError(String);

impl InterpreterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InterpreterError {}

impl From<String> for InterpreterError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for InterpreterError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

// ---------------------------------------------------------------------------
// PersistenceError
// ---------------------------------------------------------------------------

/// What the engine was trying to persist when I/O failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistAction {
    /// Appending a submitted line to the history log.
    HistoryAppend,
    /// Writing a rendered `SaveTo` result.
    SaveResult,
}

impl fmt::Display for PersistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryAppend => f.write_str("append history to"),
            Self::SaveResult => f.write_str("save result to"),
        }
    }
}

/// History-log or save-to I/O failure. Recovered and surfaced as a notice.
#[derive(Debug)]
pub struct PersistenceError {
    pub action: PersistAction,
    pub path: PathBuf,
    pub source: io::Error,
}

impl PersistenceError {
    pub fn new(action: PersistAction, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            action,
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to {} {}: {}",
            self.action,
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// StartupError
// ---------------------------------------------------------------------------

/// Fatal failures that prevent the engine from initializing.
#[derive(Debug)]
pub enum StartupError {
    /// History file exists but could not be read.
    HistoryUnreadable { path: PathBuf, source: io::Error },
    /// Terminal could not be switched into interactive mode.
    Terminal(io::Error),
    /// Diagnostic logging could not be initialized.
    Logging(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryUnreadable { path, source } => {
                write!(f, "failed to read history file {}: {source}", path.display())
            }
            Self::Terminal(e) => write!(f, "terminal setup: {e}"),
            Self::Logging(msg) => write!(f, "logging setup: {msg}"),
        }
    }
}

impl std::error::Error for StartupError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ReplError (top-level)
// ---------------------------------------------------------------------------

/// Top-level error type returned by the embedding facade.
#[derive(Debug)]
pub enum ReplError {
    Startup(StartupError),
    Config(ConfigError),
    Persistence(PersistenceError),
    Interpreter(InterpreterError),
    /// Writing to the terminal failed mid-session.
    Render(io::Error),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Startup(e) => write!(f, "startup: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Persistence(e) => write!(f, "persistence: {e}"),
            Self::Interpreter(e) => write!(f, "interpreter: {e}"),
            Self::Render(e) => write!(f, "render: {e}"),
        }
    }
}

impl std::error::Error for ReplError {}

impl From<StartupError> for ReplError {
    fn from(e: StartupError) -> Self {
        Self::Startup(e)
    }
}

impl From<ConfigError> for ReplError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PersistenceError> for ReplError {
    fn from(e: PersistenceError) -> Self {
        Self::Persistence(e)
    }
}

impl From<InterpreterError> for ReplError {
    fn from(e: InterpreterError) -> Self {
        Self::Interpreter(e)
    }
}

impl From<io::Error> for ReplError {
    fn from(e: io::Error) -> Self {
        Self::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpreter_error_displays_message_verbatim() {
        assert_eq!(
            InterpreterError::from("this is an error!!!").to_string(),
            "this is an error!!!"
        );
    }

    #[test]
    fn persistence_error_names_action_and_path() {
        let e = PersistenceError::new(
            PersistAction::SaveResult,
            "/tmp/out.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let s = e.to_string();
        assert!(s.starts_with("failed to save result to /tmp/out.txt"), "got: {s}");
        assert!(s.contains("denied"));
    }

    #[test]
    fn startup_error_for_history_mentions_path() {
        let e = StartupError::HistoryUnreadable {
            path: PathBuf::from("/var/hist"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        };
        assert!(e.to_string().contains("/var/hist"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn repl_error_wraps_each_layer() {
        let e = ReplError::from(ConfigError::Invalid("empty prompt".into()));
        assert_eq!(e.to_string(), "config: invalid config: empty prompt");

        let e = ReplError::from(InterpreterError::from("boom"));
        assert_eq!(e.to_string(), "interpreter: boom");
    }
}
