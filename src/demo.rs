//! Sample interpreter shipped with the demo binary.
//!
//! Commands:
//! - `test` prints a captured HTTP request.
//! - `lista` shows a selectable list; selecting echoes the item.
//! - `error` fails.
//! - `save <path> <command>` writes `<command>`'s output to `<path>`.
//! - anything else shows a three-column table with oversized cells.

use async_trait::async_trait;
use replkit::{CommandResult, Interpreter, InterpreterError};

const COMMANDS: &[&str] = &["error", "lista", "save", "test"];

const SAMPLE_REQUEST: &str = "POST /v1/session/start HTTP/1.1
Content-Type: application/json
Connection: keep-alive
Accept: application/json, text/plain, */*
User-Agent: replkit-demo/0.1
Content-Length: 58
Host: api.example.test

{\"token\":\"3f9c1d2e7a\",\"region\":\"eu-west\",\"version\":6.6}";

pub struct DemoInterpreter;

impl DemoInterpreter {
    fn run(&self, command: &str) -> Result<CommandResult, InterpreterError> {
        if let Some(rest) = command.strip_prefix("save ") {
            let (path, inner) = rest.trim_start().split_once(' ').ok_or_else(|| {
                InterpreterError::new("usage: save <path> <command>")
            })?;
            let inner = self.run(inner.trim())?;
            return Ok(CommandResult::save_to(path, inner));
        }
        match command {
            "test" => Ok(CommandResult::simple(SAMPLE_REQUEST)),
            "lista" => Ok(CommandResult::list_with_select(
                ["a", "b", "bc", "c", "cd"],
                |item| Some(CommandResult::simple(format!("selected: {item}"))),
            )),
            "error" => Err(InterpreterError::new("this is an error!!!")),
            _ => Ok(sample_table()),
        }
    }
}

fn sample_table() -> CommandResult {
    let rows = vec![
        vec!["n".to_string(), "col1".to_string(), "col2".to_string()],
        vec!["101".to_string(), "a".repeat(100), "b".to_string()],
        vec!["12".to_string(), "c".to_string(), "d".repeat(100)],
        vec!["1200".to_string(), "z".to_string(), "xxxx".to_string()],
    ];
    CommandResult::table_with_select(rows, |_row| {
        Some(CommandResult::simple(format!("{}#", "0123456789".repeat(100))))
    })
}

#[async_trait]
impl Interpreter for DemoInterpreter {
    async fn exec(&self, command: &str) -> Result<CommandResult, InterpreterError> {
        self.run(command.trim())
    }

    fn suggest(&self, partial_input: &str) -> Vec<String> {
        if partial_input.is_empty() {
            return Vec::new();
        }
        COMMANDS
            .iter()
            .filter(|name| name.starts_with(partial_input))
            .map(|name| name.to_string())
            .collect()
    }
}
