//! replkit: an embeddable terminal REPL engine.
//!
//! The host supplies an [`Interpreter`]; replkit handles line editing,
//! persistent history with reverse search, command suggestions, and
//! navigable list/table results whose selection runs a host callback.
//!
//! # Quick start
//!
//! ```no_run
//! use async_trait::async_trait;
//! use replkit::{CommandResult, Interpreter, InterpreterError, Repl, ReplOptions};
//! use std::sync::Arc;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl Interpreter for Echo {
//!     async fn exec(&self, command: &str) -> Result<CommandResult, InterpreterError> {
//!         Ok(CommandResult::simple(command))
//!     }
//!     fn suggest(&self, _prefix: &str) -> Vec<String> {
//!         Vec::new()
//!     }
//! }
//!
//! # async fn example() -> Result<(), replkit::ReplError> {
//! let repl = Repl::new(Arc::new(Echo), ReplOptions::default())?;
//! let status = repl.run().await?;
//! std::process::exit(status);
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod runtime;
#[cfg(test)]
mod testsupport;
pub mod tui;

pub use error::{InterpreterError, ReplError};
pub use interpreter::{CommandResult, Interpreter, OnSelect, Selection};
pub use runtime::{EventLoop, Repl, ReplOptions};
