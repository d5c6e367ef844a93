use ropey::Rope;

use super::buffer::EditorBuffer;
use super::selection::{Selection, SelectionModel};
use super::snippet::{self, InsertionRequest, ToolbarAction, Transform};
use super::surface::{EditSurface, InputEvent};

/// Indentation inserted by the Tab key.
pub const INDENT_UNIT: &str = "  ";

/// The single mutation surface for the document buffer.
///
/// Owns the authoritative content. Every mutation swaps in a new rope and
/// pushes it to the attached surface. Because replacing the surface's
/// value can disturb its selection, cursor placement after an insertion is
/// deferred to [`after_render`](Self::after_render).
#[derive(Debug)]
pub struct TextBufferController<S = EditorBuffer> {
    content: Rope,
    surface: Option<S>,
    pending_cursor: Option<usize>,
    revision: u64,
}

impl<S: EditSurface> TextBufferController<S> {
    /// Create a controller with no surface attached.
    pub fn new(content: &str) -> Self {
        Self {
            content: Rope::from_str(content),
            surface: None,
            pending_cursor: None,
            revision: 0,
        }
    }

    /// Attach an editing surface and show the current content in it.
    pub fn attach(&mut self, mut surface: S) {
        surface.load(self.content.clone());
        self.surface = Some(surface);
        self.pending_cursor = None;
    }

    /// Detach and return the surface.
    pub fn detach(&mut self) -> Option<S> {
        self.pending_cursor = None;
        self.surface.take()
    }

    pub const fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub const fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn content(&self) -> String {
        self.content.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.content.len_chars()
    }

    /// Bumped on every content change.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn has_pending_cursor(&self) -> bool {
        self.pending_cursor.is_some()
    }

    /// Caret offset of the surface (0 when detached).
    pub fn cursor(&self) -> usize {
        self.selection().end
    }

    /// Replace the selection with `text`; the cursor lands after it.
    ///
    /// Returns `false` without mutating when no surface is attached.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if self.surface.is_none() {
            return false;
        }
        let selection = self.selection();
        self.apply_insertion(&InsertionRequest {
            text: text.to_string(),
            range: (selection.start, selection.end),
        })
    }

    /// Insert the indentation unit at the cursor, replacing any selection.
    pub fn insert_indent(&mut self) -> bool {
        self.insert_text(INDENT_UNIT)
    }

    /// Replace `req.range` with `req.text` and schedule the cursor after it.
    pub fn apply_insertion(&mut self, req: &InsertionRequest) -> bool {
        self.flush_pending_cursor();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let len = self.content.len_chars();
        let end = req.range.1.min(len);
        let start = req.range.0.min(end);
        if start == end && req.text.is_empty() {
            return false;
        }

        let mut next = self.content.clone();
        next.remove(start..end);
        next.insert(start, &req.text);
        self.content = next;
        self.revision += 1;

        surface.replace_content(self.content.clone());
        let cursor = start + req.text.chars().count();
        self.pending_cursor = Some(cursor);
        tracing::debug!(
            start,
            end,
            inserted = req.text.len(),
            cursor,
            "buffer.insert"
        );
        true
    }

    /// Replace the whole buffer (load/import). Leaves the cursor alone apart
    /// from clamping.
    pub fn set_content(&mut self, text: &str) {
        self.flush_pending_cursor();
        self.content = Rope::from_str(text);
        self.revision += 1;
        if let Some(surface) = self.surface.as_mut() {
            surface.replace_content(self.content.clone());
        }
        tracing::debug!(chars = self.content.len_chars(), "buffer.set_content");
    }

    /// Forward a raw keystroke to the surface and adopt its new value.
    pub fn handle_input(&mut self, input: InputEvent) -> bool {
        self.flush_pending_cursor();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !surface.apply_input(input) {
            return false;
        }
        self.content = surface.content();
        self.revision += 1;
        true
    }

    /// Run a toolbar action against the current selection.
    ///
    /// Returns whether the buffer changed.
    pub fn apply_action(&mut self, action: ToolbarAction) -> bool {
        self.flush_pending_cursor();
        match snippet::transform(action, &self.selection()) {
            Transform::Insert(req) => self.apply_insertion(&req),
            Transform::Undo => self.undo(),
            Transform::Redo => self.redo(),
        }
    }

    /// Run a toolbar action by identifier. Unknown identifiers are ignored.
    pub fn apply_named_action(&mut self, id: &str) -> bool {
        match id.parse::<ToolbarAction>() {
            Ok(action) => self.apply_action(action),
            Err(err) => {
                tracing::trace!(%err, "toolbar.ignored");
                false
            }
        }
    }

    /// Step back through the surface's native history.
    pub fn undo(&mut self) -> bool {
        self.step_history(true)
    }

    /// Step forward through the surface's native history.
    pub fn redo(&mut self) -> bool {
        self.step_history(false)
    }

    /// Whether [`undo`](Self::undo) would change anything.
    pub fn can_undo(&self) -> bool {
        self.surface.as_ref().is_some_and(EditSurface::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.surface.as_ref().is_some_and(EditSurface::can_redo)
    }

    /// Post-render callback: focus the surface and place a pending cursor.
    ///
    /// Returns `true` if a placement was applied.
    pub fn after_render(&mut self) -> bool {
        let Some(offset) = self.pending_cursor.take() else {
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let offset = offset.min(self.content.len_chars());
        surface.focus();
        surface.set_selection(offset, offset);
        tracing::trace!(offset, "cursor.placed");
        true
    }

    fn step_history(&mut self, back: bool) -> bool {
        self.flush_pending_cursor();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let moved = if back { surface.undo() } else { surface.redo() };
        if moved {
            self.content = surface.content();
            self.revision += 1;
        }
        moved
    }

    // A placement that has not run yet must land before anything reads the
    // selection again.
    fn flush_pending_cursor(&mut self) {
        if self.pending_cursor.is_some() {
            self.after_render();
        }
    }
}

impl<S: EditSurface> SelectionModel for TextBufferController<S> {
    fn selection(&self) -> Selection {
        let Some(surface) = self.surface.as_ref() else {
            return Selection::empty();
        };
        if let Some(offset) = self.pending_cursor {
            let offset = offset.min(self.content.len_chars());
            return Selection::of(&self.content, offset, offset);
        }
        surface.selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Direction;

    fn attached(text: &str, start: usize, end: usize) -> TextBufferController {
        let mut controller = TextBufferController::new(text);
        controller.attach(EditorBuffer::empty());
        if let Some(surface) = controller.surface.as_mut() {
            surface.set_selection(start, end);
        }
        controller
    }

    fn surface_cursor(controller: &TextBufferController) -> (usize, usize) {
        let cursor = controller.surface().unwrap().cursor();
        (cursor.start(), cursor.end())
    }

    #[test]
    fn test_insert_text_replaces_selection_and_defers_cursor() {
        let mut c = attached("hello world", 6, 11);
        assert!(c.insert_text("there"));
        assert_eq!(c.content(), "hello there");
        assert!(c.has_pending_cursor());

        assert!(c.after_render());
        assert_eq!(surface_cursor(&c), (11, 11));
        assert!(c.surface().unwrap().is_focused());
    }

    #[test]
    fn test_surface_sees_new_content_before_cursor_placement() {
        let mut c = attached("abc", 3, 3);
        c.insert_text("def");
        assert_eq!(c.surface().unwrap().text(), "abcdef");
        // Surface only clamped its selection; placement has not run yet.
        assert_eq!(surface_cursor(&c), (3, 3));
        c.after_render();
        assert_eq!(surface_cursor(&c), (6, 6));
    }

    #[test]
    fn test_insert_text_without_surface_is_noop() {
        let mut c: TextBufferController = TextBufferController::new("keep");
        assert!(!c.insert_text("x"));
        assert!(!c.insert_indent());
        assert_eq!(c.content(), "keep");
        assert_eq!(c.revision(), 0);
        assert!(!c.after_render());
    }

    #[test]
    fn test_insert_indent_at_collapsed_cursor() {
        let mut c = attached("ab", 1, 1);
        assert!(c.insert_indent());
        c.after_render();
        assert_eq!(c.content(), "a  b");
        assert_eq!(surface_cursor(&c), (3, 3));
    }

    #[test]
    fn test_insert_indent_replaces_selection() {
        let mut c = attached("abcd", 1, 3);
        c.insert_indent();
        c.after_render();
        assert_eq!(c.content(), "a  d");
        assert_eq!(c.cursor(), 3);
    }

    #[test]
    fn test_detached_controller_keeps_content_and_ignores_edits() {
        let mut c = attached("abc", 3, 3);
        c.insert_text("!");
        let surface = c.detach().unwrap();
        assert!(!c.is_attached());
        assert!(!c.has_pending_cursor());
        assert_eq!(surface.text(), "abc!");
        assert!(!c.insert_text("?"));
        assert!(!c.apply_action(ToolbarAction::Bold));
        assert_eq!(c.content(), "abc!");
        assert_eq!(c.selection(), Selection::empty());
    }

    #[test]
    fn test_set_content_clamps_cursor_when_shrinking() {
        let mut c = attached("a long line of text", 10, 15);
        c.set_content("# Hi");
        assert_eq!(c.content(), "# Hi");
        assert!(!c.has_pending_cursor());
        let sel = c.selection();
        assert!(sel.end <= 4);
        assert_eq!((sel.start, sel.end), (4, 4));
    }

    #[test]
    fn test_set_content_without_surface_still_replaces_buffer() {
        let mut c: TextBufferController = TextBufferController::new("old");
        c.set_content("new");
        assert_eq!(c.content(), "new");
        assert_eq!(c.selection(), Selection::empty());
    }

    #[test]
    fn test_selection_without_surface_is_zero() {
        let c: TextBufferController = TextBufferController::new("text");
        assert_eq!(c.selection(), Selection::empty());
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn test_pending_cursor_is_visible_to_selection_queries() {
        let mut c = attached("abc", 0, 3);
        c.insert_text("x");
        let sel = c.selection();
        assert_eq!((sel.start, sel.end), (1, 1));
    }

    #[test]
    fn test_typing_after_unrendered_insert_lands_after_insertion() {
        let mut c = attached("ab", 1, 1);
        c.insert_text("XY");
        assert!(c.handle_input(InputEvent::Char('!')));
        assert_eq!(c.content(), "aXY!b");
        assert!(!c.has_pending_cursor());
    }

    #[test]
    fn test_handle_input_adopts_surface_value() {
        let mut c = attached("", 0, 0);
        for ch in "hi".chars() {
            c.handle_input(InputEvent::Char(ch));
        }
        assert_eq!(c.content(), "hi");
        assert_eq!(c.revision(), 2);
    }

    #[test]
    fn test_movement_input_does_not_bump_revision() {
        let mut c = attached("hi", 0, 0);
        let changed = c.handle_input(InputEvent::Move {
            direction: Direction::Right,
            extend: false,
        });
        assert!(!changed);
        assert_eq!(c.revision(), 0);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn test_bold_action_wraps_selection() {
        let mut c = attached("say hi now", 4, 6);
        assert!(c.apply_action(ToolbarAction::Bold));
        c.after_render();
        assert_eq!(c.content(), "say **hi** now");
        assert_eq!(c.cursor(), 10);
    }

    #[test]
    fn test_bold_twice_on_reselected_text() {
        let mut c = attached("hi", 0, 2);
        c.apply_action(ToolbarAction::Bold);
        c.after_render();
        c.surface.as_mut().unwrap().set_selection(0, 6);
        c.apply_action(ToolbarAction::Bold);
        assert_eq!(c.content(), "****hi****");
    }

    #[test]
    fn test_unknown_named_action_is_silently_ignored() {
        let mut c = attached("text", 0, 4);
        assert!(!c.apply_named_action("sparkle"));
        assert_eq!(c.content(), "text");
        assert_eq!(c.revision(), 0);
        assert!(!c.has_pending_cursor());
    }

    #[test]
    fn test_named_table_action_discards_selection() {
        let mut c = attached("prose", 0, 5);
        assert!(c.apply_named_action("table"));
        assert_eq!(c.content(), snippet::TABLE_TEMPLATE);
    }

    #[test]
    fn test_undo_redo_delegate_to_surface_history() {
        let mut c = attached("hi", 0, 2);
        c.apply_action(ToolbarAction::Italic);
        assert_eq!(c.content(), "*hi*");
        assert!(c.apply_action(ToolbarAction::Undo));
        assert_eq!(c.content(), "hi");
        assert!(c.apply_action(ToolbarAction::Redo));
        assert_eq!(c.content(), "*hi*");
    }

    #[test]
    fn test_history_availability_tracks_edits() {
        let mut c = attached("hi", 0, 0);
        assert!(!c.can_undo());
        assert!(!c.can_redo());
        c.apply_action(ToolbarAction::Bold);
        assert!(c.can_undo());
        c.undo();
        assert!(!c.can_undo());
        assert!(c.can_redo());

        c.detach();
        assert!(!c.can_redo());
    }

    #[test]
    fn test_empty_insert_over_collapsed_cursor_is_noop() {
        let mut c = attached("abc", 1, 1);
        assert!(!c.insert_text(""));
        assert_eq!(c.revision(), 0);
    }

    #[test]
    fn test_insertion_range_is_clamped_to_content() {
        let mut c = attached("abc", 0, 0);
        let changed = c.apply_insertion(&InsertionRequest {
            text: "!".to_string(),
            range: (10, 20),
        });
        assert!(changed);
        assert_eq!(c.content(), "abc!");
        c.after_render();
        assert_eq!(c.cursor(), 4);
    }
}
