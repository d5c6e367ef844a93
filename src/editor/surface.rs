use ropey::Rope;

use super::buffer::Direction;
use super::selection::SelectionModel;

/// Raw input forwarded from the host to the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Newline,
    Paste(String),
    Backspace,
    Delete,
    Move { direction: Direction, extend: bool },
    Home { extend: bool },
    End { extend: bool },
    WordLeft { extend: bool },
    WordRight { extend: bool },
    DocumentStart { extend: bool },
    DocumentEnd { extend: bool },
    SelectAll,
}

/// Operations the controller performs on an editing surface.
///
/// The surface renders a value and owns the live selection. Replacing its
/// value may disturb the selection, which is why the controller restores
/// the cursor in a post-render step.
pub trait EditSurface: SelectionModel {
    /// Current value shown by the surface.
    fn content(&self) -> Rope;

    /// Show a new value. The selection is clamped to the new length.
    fn replace_content(&mut self, content: Rope);

    /// Show a fresh value with the cursor at the start and no history.
    fn load(&mut self, content: Rope);

    /// Set the selection; bounds are clamped and ordered.
    fn set_selection(&mut self, start: usize, end: usize);

    fn focus(&mut self);

    /// Handle a raw keystroke natively. Returns `true` if the value changed.
    fn apply_input(&mut self, input: InputEvent) -> bool;

    /// Step back through the surface's native history.
    fn undo(&mut self) -> bool;

    /// Step forward through the surface's native history.
    fn redo(&mut self) -> bool;

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;
}
