//! Line editor behavior observed through the public engine API.

mod common;

use common::{ctrl, engine, key, ScriptedInterpreter, TempDir};
use crossterm::event::KeyCode;
use replkit::engine::{Effect, EngineEvent, EngineState, ReplEngine};
use replkit::tui::{EditorMode, History};
use replkit::CommandResult;
use std::sync::Arc;

fn seeded_engine(entries: &[&str]) -> ReplEngine {
    let mut history = History::new();
    for entry in entries {
        history.push(*entry);
    }
    let mut engine = engine(Arc::new(ScriptedInterpreter::new()), history, None, None);
    engine.start();
    engine
}

fn type_text(engine: &mut ReplEngine, text: &str) {
    for ch in text.chars() {
        engine.handle(key(KeyCode::Char(ch)));
    }
}

#[test]
fn reverse_search_cycles_and_commits_match() {
    let mut engine = seeded_engine(&["foo", "foobar", "baz"]);
    engine.handle(ctrl('r'));
    assert!(matches!(engine.editor().mode(), EditorMode::ReverseSearch(_)));
    type_text(&mut engine, "foo");
    // Most recent match first, then older ones.
    assert!(engine.view().text().contains("foobar"));
    engine.handle(ctrl('r'));
    engine.handle(key(KeyCode::Enter));
    assert!(matches!(engine.editor().mode(), EditorMode::Normal));
    assert_eq!(engine.editor().buffer(), "foo");
    assert_eq!(engine.state(), EngineState::ReadingInput);

    // A second Enter submits the recalled line.
    let effects = engine.handle(key(KeyCode::Enter));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Execute(cmd) if cmd == "foo")));
}

#[test]
fn cancelled_search_keeps_buffer() {
    let mut engine = seeded_engine(&["deploy prod"]);
    type_text(&mut engine, "draft");
    engine.handle(ctrl('r'));
    type_text(&mut engine, "dep");
    engine.handle(key(KeyCode::Esc));
    assert_eq!(engine.editor().buffer(), "draft");
    assert_eq!(engine.state(), EngineState::ReadingInput);
}

#[test]
fn history_navigation_restores_draft() {
    let mut engine = seeded_engine(&["one", "two"]);
    type_text(&mut engine, "dr");
    engine.handle(key(KeyCode::Up));
    assert_eq!(engine.editor().buffer(), "two");
    engine.handle(key(KeyCode::Up));
    engine.handle(key(KeyCode::Up));
    // Clamped at the oldest entry.
    assert_eq!(engine.editor().buffer(), "one");
    engine.handle(key(KeyCode::Down));
    engine.handle(key(KeyCode::Down));
    assert_eq!(engine.editor().buffer(), "dr");
}

#[test]
fn history_file_feeds_a_new_session() {
    let temp = TempDir::new("editor-history");
    let path = temp.child("history");
    std::fs::write(&path, "  test \n\nlista\n").unwrap();
    let history = History::load(&path).unwrap();
    let mut engine = engine(
        Arc::new(ScriptedInterpreter::new()),
        history,
        Some(path.clone()),
        None,
    );
    engine.start();
    assert_eq!(engine.history(), &["test", "lista"]);
    engine.handle(key(KeyCode::Up));
    engine.handle(key(KeyCode::Up));
    assert_eq!(engine.editor().buffer(), "test");
}

#[test]
fn resize_relays_out_active_table() {
    let mut engine = seeded_engine(&[]);
    type_text(&mut engine, "tbl");
    engine.handle(key(KeyCode::Enter));
    let rows = vec![
        vec!["n".to_string(), "text".to_string()],
        vec!["1".to_string(), "x".repeat(200)],
    ];
    engine.handle(EngineEvent::CommandCompleted(Ok(CommandResult::table(rows))));
    assert_eq!(engine.state(), EngineState::ReadingInputWithTable);

    engine.handle(EngineEvent::Resize {
        width: 40,
        height: 12,
    });
    let frame = engine.view();
    for line in &frame.lines {
        assert!(line.width() <= 40, "line too wide: {:?}", line.text());
    }
}
