//! CLI argument parsing via clap.

use crate::build_info;
use clap::Parser;

/// Demo REPL for the replkit engine. Without COMMAND it starts an interactive
/// session; with COMMAND it runs that one command and exits.
#[derive(Debug, Parser)]
#[command(
    name = "replkit",
    version,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Command to execute non-interactively.
    pub command: Option<String>,

    /// Path to config file (default: ./replkit.toml or ~/.config/replkit/replkit.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// History log file (default: ~/.config/replkit/history).
    #[arg(long = "history", conflicts_with = "no_history")]
    pub history: Option<String>,

    /// Keep history in memory only.
    #[arg(long = "no-history")]
    pub no_history: bool,

    /// Override the prompt text.
    #[arg(long = "prompt")]
    pub prompt: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Write diagnostic logs to this file (filter via REPLKIT_LOG).
    #[arg(long = "log-file")]
    pub log_file: Option<String>,
}
