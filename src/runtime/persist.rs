//! Background file writes: history appends and save-to outputs.
//!
//! Both files hold user command text, so they are created owner-only.

use crate::error::{PersistAction, PersistenceError};
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Append one newline-terminated line to the history log, creating its
/// directory on first use.
pub async fn append_history_line(path: &Path, line: &str) -> Result<(), PersistenceError> {
    let result = async {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = open_private(path, true).await?;
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');
        file.write_all(record.as_bytes()).await?;
        file.flush().await
    }
    .await;
    result.map_err(|source| PersistenceError::new(PersistAction::HistoryAppend, path, source))
}

/// Replace `path` with rendered result text.
pub async fn write_saved_output(path: &Path, content: &str) -> Result<(), PersistenceError> {
    let result = async {
        let mut file = open_private(path, false).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await
    }
    .await;
    result.map_err(|source| PersistenceError::new(PersistAction::SaveResult, path, source))
}

async fn open_private(path: &Path, append: bool) -> std::io::Result<tokio::fs::File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path).await
}
