//! In-memory command history mirrored from an append-only log file.

use crate::error::StartupError;
use std::fs;
use std::io;
use std::path::Path;

/// Ordered sequence of submitted commands, oldest first.
///
/// Duplicates are kept and nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load history from a newline-separated log file.
    ///
    /// A missing file yields an empty history. Any other read failure is
    /// fatal for startup.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(Self::parse(&raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(StartupError::HistoryUnreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse log contents: trimmed lines in file order, blanks skipped.
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    /// Record one submitted line verbatim.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n`-th most recent entry, 1-based (`1` is the last submitted).
    pub fn nth_most_recent(&self, n: usize) -> Option<&str> {
        if n == 0 || n > self.entries.len() {
            return None;
        }
        self.entries
            .get(self.entries.len() - n)
            .map(String::as_str)
    }

    /// Entries containing `query` as a substring, most recent first.
    ///
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .rev()
            .filter(|entry| entry.contains(query))
            .cloned()
            .collect()
    }

    /// Entries from most recent to oldest.
    pub fn iter_recent(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(String::as_str)
    }
}
