//! CLI entry point for the replkit demo REPL.

mod build_info;
mod cli;
mod demo;

use clap::Parser;
use replkit::config::{load_config, Config};
use replkit::logging::init_tracing;
use replkit::{Repl, ReplOptions};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    apply_cli_overrides(&mut config, &args);

    if let Some(path) = config.log_path() {
        if let Err(e) = init_tracing(&path) {
            eprintln!("warning: {e}");
        }
    }
    info!(
        version = build_info::VERSION,
        commit = build_info::GIT_COMMIT,
        "replkit starting"
    );

    let options = ReplOptions {
        prompt: config.display.prompt.clone(),
        history_file: config.history_path(),
        color: config.display.color,
    };
    let repl = match Repl::new(Arc::new(demo::DemoInterpreter), options) {
        Ok(repl) => repl,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Some(command) => repl.run_non_interactive(command).await,
        None => repl.run().await,
    };
    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// CLI flags win over file and environment values.
fn apply_cli_overrides(config: &mut Config, args: &cli::Args) {
    if let Some(prompt) = &args.prompt {
        if !prompt.trim().is_empty() {
            config.display.prompt = prompt.clone();
        }
    }
    if let Some(history) = &args.history {
        config.history.enabled = true;
        config.history.file = Some(history.clone());
    }
    if args.no_history {
        config.history.enabled = false;
    }
    if args.no_color {
        config.display.color = false;
    }
    if let Some(log_file) = &args.log_file {
        config.logging.file = Some(log_file.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let mut config = Config::default();
        config.history.file = Some("/from/config".into());
        let args = cli::Args::parse_from([
            "replkit",
            "--prompt",
            "calc>",
            "--no-color",
            "--history",
            "/from/cli",
        ]);
        apply_cli_overrides(&mut config, &args);
        assert_eq!(config.display.prompt, "calc>");
        assert!(!config.display.color);
        assert_eq!(
            config.history_path(),
            Some(std::path::PathBuf::from("/from/cli"))
        );
    }

    #[test]
    fn no_history_disables_persistence() {
        let mut config = Config::default();
        let args = cli::Args::parse_from(["replkit", "--no-history"]);
        apply_cli_overrides(&mut config, &args);
        assert!(config.history_path().is_none());
    }

    #[test]
    fn blank_cli_prompt_keeps_configured_prompt() {
        let mut config = Config::default();
        let args = cli::Args::parse_from(["replkit", "--prompt", " "]);
        apply_cli_overrides(&mut config, &args);
        assert_eq!(config.display.prompt, "replkit >");
    }
}
