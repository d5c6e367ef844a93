//! The text-buffer editing engine.
//!
//! - [`EditorBuffer`]: rope-backed editing surface with a live selection
//! - [`TextBufferController`]: the authoritative buffer and its mutation primitives
//! - [`snippet`]: toolbar actions mapped to markdown snippets

mod buffer;
mod controller;
mod history;
mod selection;
pub mod snippet;
mod surface;

pub use buffer::{Cursor, Direction, EditorBuffer};
pub use controller::{INDENT_UNIT, TextBufferController};
pub use selection::{Selection, SelectionModel};
pub use snippet::{InsertionRequest, ToolbarAction, Transform, UnknownAction};
pub use surface::{EditSurface, InputEvent};
