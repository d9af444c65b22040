//! Default configuration constants.

/// Directory name under the config root holding replkit files.
pub(super) const CONFIG_DIR_NAME: &str = "replkit";
/// Config file name, both local and global.
pub(super) const CONFIG_FILE_NAME: &str = "replkit.toml";
/// History log file name under the config directory.
pub(super) const HISTORY_FILE_NAME: &str = "history";
/// Color output is on unless disabled.
pub(super) const DEFAULT_COLOR: bool = true;
/// History persistence is on unless disabled.
pub(super) const DEFAULT_HISTORY_ENABLED: bool = true;

/// Environment variable overriding `display.prompt`.
pub(super) const ENV_PROMPT: &str = "REPLKIT_PROMPT";
/// Environment variable overriding `history.file`.
pub(super) const ENV_HISTORY_FILE: &str = "REPLKIT_HISTORY_FILE";
/// Any non-empty value disables color.
pub(super) const ENV_NO_COLOR: &str = "REPLKIT_NO_COLOR";
/// Environment variable overriding `logging.file`.
pub(super) const ENV_LOG_FILE: &str = "REPLKIT_LOG_FILE";
