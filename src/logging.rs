//! Diagnostic logging to a file.
//!
//! The live terminal region owns stdout and stderr, so logs only go to a file
//! and only when one is configured. The level filter comes from `REPLKIT_LOG`.

use crate::error::StartupError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_FILTER_ENV: &str = "REPLKIT_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global fmt subscriber appending to `path`.
pub fn init_tracing(path: &Path) -> Result<(), StartupError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| StartupError::Logging(format!("{}: {err}", path.display())))?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|err| StartupError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| StartupError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    #[test]
    fn unwritable_log_path_is_a_startup_error() {
        let temp = TestTempDir::new("logging-bad-path");
        let err = init_tracing(&temp.child("missing-dir/replkit.log")).unwrap_err();
        assert!(matches!(err, StartupError::Logging(msg) if msg.contains("replkit.log")));
    }
}
