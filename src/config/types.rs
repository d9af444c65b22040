//! Configuration data types.

use serde::Deserialize;

use super::defaults::{DEFAULT_COLOR, DEFAULT_HISTORY_ENABLED};
use crate::tui::settings::DEFAULT_PROMPT;

/// Top-level configuration, fully resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

/// Prompt and color settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Prompt text; one space is added when painting.
    pub prompt: String,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            color: DEFAULT_COLOR,
        }
    }
}

/// Input history persistence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Log file path; `~/` is expanded. Defaults to `<config root>/replkit/history`.
    pub file: Option<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_HISTORY_ENABLED,
            file: None,
        }
    }
}

/// Diagnostic log destination. Logging stays off without a file because the
/// terminal owns stderr.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
}
