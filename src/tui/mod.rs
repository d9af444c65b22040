//! Terminal user-interface building blocks.
//!
//! This module hosts the line editor, result widgets, and terminal renderer
//! primitives. Stateful input and widget logic produce plain [`Frame`] data;
//! only the renderer touches the terminal, so the engine stays testable
//! without one.

pub mod frame;
pub mod history;
pub mod input;
mod input_buffer;
pub mod list;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod table;
pub mod text;
pub mod widget;

pub use frame::{Frame, Line, ScrollbackEntry, Span, SpanStyle};
pub use history::History;
pub use input::{EditorMode, EditorOutcome, LineEditor, ReverseSearch};
pub use list::{FilterState, ListWidget};
pub use renderer::{RenderSink, TerminalRenderer};
pub use table::{compute_column_widths, TableWidget};
pub use widget::WidgetOutcome;
