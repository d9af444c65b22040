//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. CLI flags (applied by the binary on top of the returned [`Config`])
//! 2. Environment variables (`REPLKIT_PROMPT`, `REPLKIT_HISTORY_FILE`,
//!    `REPLKIT_NO_COLOR`, `REPLKIT_LOG_FILE`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./replkit.toml in the current directory
//! 5. $XDG_CONFIG_HOME/replkit/replkit.toml (or ~/.config/replkit/replkit.toml)
//! 6. Built-in defaults

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

mod defaults;
mod env;
mod sources;
mod types;

use defaults::{CONFIG_DIR_NAME, HISTORY_FILE_NAME};
use env::apply_runtime_env_overrides;
use sources::read_config_text_with_sources;
pub use types::{Config, DisplayConfig, HistoryConfig, LoggingConfig};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    debug!(source = ?source, "config source selected");

    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup);
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.display.prompt.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "display.prompt must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

impl Config {
    /// History log path, or `None` when persistence is disabled or no
    /// location can be resolved.
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history.enabled {
            return None;
        }
        match &self.history.file {
            Some(file) => Some(expand_home(file)),
            None => default_history_path(),
        }
    }

    /// Diagnostic log path, when configured.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.file.as_deref().map(expand_home)
    }
}

/// `<config root>/replkit/history`.
pub fn default_history_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(HISTORY_FILE_NAME))
}

/// Expand a leading `~/` with the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, dirs::home_dir)
}

fn expand_home_with<FHome>(path: &str, home: FHome) -> PathBuf
where
    FHome: Fn() -> Option<PathBuf>,
{
    if path == "~" {
        if let Some(dir) = home() {
            return dir;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dir) = home() {
            return dir.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the XDG-style config root used by replkit.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
fn parse_file_config_for_test(toml_text: &str) -> Result<Config, ConfigError> {
    load_config_from_sources(
        None,
        |path| {
            if path == Path::new("replkit.toml") {
                Ok(toml_text.to_string())
            } else {
                Err(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        },
        |_| None,
        || None,
    )
}
