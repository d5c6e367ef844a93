use ropey::Rope;

use super::history::{EditKind, History};
use super::selection::{Selection, SelectionModel};
use super::surface::{EditSurface, InputEvent};

/// Cursor state of the editing surface.
///
/// Offsets are char indices into the buffer. `anchor` is where the
/// selection started, `head` is where the caret is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub anchor: usize,
    pub head: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
}

impl Cursor {
    /// A collapsed cursor at `offset`.
    pub const fn at(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
            col_memory: None,
        }
    }

    /// A selection from `anchor` to `head`.
    pub const fn range(anchor: usize, head: usize) -> Self {
        Self {
            anchor,
            head,
            col_memory: None,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub const fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    fn clamp(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
            col_memory: self.col_memory,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::at(0)
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The editing surface: a rope-backed text field with a live selection.
///
/// Handles raw keystrokes the way a native text field would, and keeps
/// its own undo history. The controller talks to it through
/// [`EditSurface`].
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    focused: bool,
    history: History,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            focused: false,
            history: History::default(),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Total number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Char offset of the first char of `line_idx`.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Line and column (in chars) of the caret.
    pub fn head_line_col(&self) -> (usize, usize) {
        self.line_col(self.cursor.head)
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert a character, replacing the selection.
    pub fn insert_char(&mut self, ch: char) {
        let kind = if ch.is_whitespace() || !self.cursor.is_collapsed() {
            EditKind::Replace
        } else {
            EditKind::Typing
        };
        let mut tmp = [0u8; 4];
        self.replace_selection(ch.encode_utf8(&mut tmp), kind);
    }

    /// Insert a string, replacing the selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() && self.cursor.is_collapsed() {
            return;
        }
        self.replace_selection(s, EditKind::Replace);
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.replace_selection("\n", EditKind::Replace);
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if !self.cursor.is_collapsed() {
            self.replace_selection("", EditKind::Deletion);
            return true;
        }
        let head = self.cursor.head;
        if head == 0 {
            return false;
        }
        // Remove a CRLF pair as one unit.
        let start = if self.crlf_before(head) { head - 2 } else { head - 1 };
        self.remove_range(start, head, EditKind::Deletion);
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if !self.cursor.is_collapsed() {
            self.replace_selection("", EditKind::Deletion);
            return true;
        }
        let head = self.cursor.head;
        if head >= self.rope.len_chars() {
            return false;
        }
        let end = if self.crlf_at(head) { head + 2 } else { head + 1 };
        self.remove_range(head, end, EditKind::Deletion);
        true
    }

    /// Move the cursor in the given direction, optionally extending the selection.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        self.history.break_run();
        match direction {
            Direction::Left => self.move_horizontal(false, extend),
            Direction::Right => self.move_horizontal(true, extend),
            Direction::Up => self.move_vertical(false, extend),
            Direction::Down => self.move_vertical(true, extend),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let (line, _) = self.head_line_col();
        self.place(self.line_start(line), extend);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let (line, _) = self.head_line_col();
        self.place(self.line_start(line) + self.line_len(line), extend);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let chars: Vec<char> = self.rope.slice(..self.cursor.head).chars().collect();
        let mut idx = chars.len();
        while idx > 0 && !is_word_char(chars[idx - 1]) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(chars[idx - 1]) {
            idx -= 1;
        }
        self.place(idx, extend);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let head = self.cursor.head;
        let mut idx = head;
        let mut chars = self.rope.slice(head..).chars().peekable();
        while chars.peek().is_some_and(|c| is_word_char(*c)) {
            chars.next();
            idx += 1;
        }
        while chars.peek().is_some_and(|c| !is_word_char(*c)) {
            chars.next();
            idx += 1;
        }
        self.place(idx, extend);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.place(0, extend);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.place(self.rope.len_chars(), extend);
    }

    /// Move cursor to a line and column, clamping both.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.place(self.line_start(line) + col, false);
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.history.break_run();
        self.cursor = Cursor::range(0, self.rope.len_chars());
    }

    // --- Private helpers ---

    fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    fn place(&mut self, offset: usize, extend: bool) {
        self.history.break_run();
        let offset = offset.min(self.rope.len_chars());
        self.cursor = if extend {
            Cursor::range(self.cursor.anchor, offset)
        } else {
            Cursor::at(offset)
        };
    }

    fn replace_selection(&mut self, text: &str, kind: EditKind) {
        let (start, end) = (self.cursor.start(), self.cursor.end());
        self.history.record(kind, &self.rope, self.cursor);
        if start < end {
            self.rope.remove(start..end);
        }
        self.rope.insert(start, text);
        self.cursor = Cursor::at(start + text.chars().count());
    }

    fn remove_range(&mut self, start: usize, end: usize, kind: EditKind) {
        self.history.record(kind, &self.rope, self.cursor);
        self.rope.remove(start..end);
        self.cursor = Cursor::at(start);
    }

    fn move_horizontal(&mut self, forward: bool, extend: bool) {
        let cursor = self.cursor;
        let target = if !extend && !cursor.is_collapsed() {
            // Collapse to the matching edge of the selection.
            if forward { cursor.end() } else { cursor.start() }
        } else if forward {
            let step = if self.crlf_at(cursor.head) { 2 } else { 1 };
            (cursor.head + step).min(self.rope.len_chars())
        } else {
            let step = if self.crlf_before(cursor.head) { 2 } else { 1 };
            cursor.head.saturating_sub(step)
        };
        self.place(target, extend);
    }

    /// Whether a `\r\n` pair starts at `offset`.
    fn crlf_at(&self, offset: usize) -> bool {
        offset + 1 < self.rope.len_chars()
            && self.rope.char(offset) == '\r'
            && self.rope.char(offset + 1) == '\n'
    }

    /// Whether a `\r\n` pair ends at `offset`.
    fn crlf_before(&self, offset: usize) -> bool {
        offset >= 2 && self.crlf_at(offset - 2)
    }

    fn move_vertical(&mut self, down: bool, extend: bool) {
        let (line, col) = self.head_line_col();
        let memory = self.cursor.col_memory.unwrap_or(col);
        let target_line = if down {
            if line + 1 >= self.line_count() {
                return;
            }
            line + 1
        } else {
            if line == 0 {
                return;
            }
            line - 1
        };
        let target = self.line_start(target_line) + memory.min(self.line_len(target_line));
        self.place(target, extend);
        self.cursor.col_memory = Some(memory);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl SelectionModel for EditorBuffer {
    fn selection(&self) -> Selection {
        Selection::of(&self.rope, self.cursor.start(), self.cursor.end())
    }
}

impl EditSurface for EditorBuffer {
    fn content(&self) -> Rope {
        self.rope.clone()
    }

    fn replace_content(&mut self, content: Rope) {
        if self.rope == content {
            return;
        }
        self.history.record(EditKind::Replace, &self.rope, self.cursor);
        self.rope = content;
        self.cursor = self.cursor.clamp(self.rope.len_chars());
        self.cursor.col_memory = None;
    }

    fn load(&mut self, content: Rope) {
        self.rope = content;
        self.cursor = Cursor::default();
        self.history = History::default();
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.history.break_run();
        let len = self.rope.len_chars();
        let end = end.min(len);
        self.cursor = Cursor::range(start.min(end), end);
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn apply_input(&mut self, input: InputEvent) -> bool {
        match input {
            InputEvent::Char(ch) => {
                self.insert_char(ch);
                true
            }
            InputEvent::Newline => {
                self.split_line();
                true
            }
            InputEvent::Paste(text) => {
                let changed = !(text.is_empty() && self.cursor.is_collapsed());
                self.insert_str(&text);
                changed
            }
            InputEvent::Backspace => self.delete_back(),
            InputEvent::Delete => self.delete_forward(),
            InputEvent::Move { direction, extend } => {
                self.move_cursor(direction, extend);
                false
            }
            InputEvent::Home { extend } => {
                self.move_home(extend);
                false
            }
            InputEvent::End { extend } => {
                self.move_end(extend);
                false
            }
            InputEvent::WordLeft { extend } => {
                self.move_word_left(extend);
                false
            }
            InputEvent::WordRight { extend } => {
                self.move_word_right(extend);
                false
            }
            InputEvent::DocumentStart { extend } => {
                self.move_to_start(extend);
                false
            }
            InputEvent::DocumentEnd { extend } => {
                self.move_to_end(extend);
                false
            }
            InputEvent::SelectAll => {
                self.select_all();
                false
            }
        }
    }

    fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo(&self.rope, self.cursor) else {
            return false;
        };
        self.rope = snapshot.rope;
        self.cursor = snapshot.cursor.clamp(self.rope.len_chars());
        true
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo(&self.rope, self.cursor) else {
            return false;
        };
        self.rope = snapshot.rope;
        self.cursor = snapshot.cursor.clamp(self.rope.len_chars());
        true
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("cursor", &self.cursor)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some("world".to_string()));
        assert_eq!(buf.text(), "hello\nworld");
    }

    #[test]
    fn test_cursor_starts_at_origin() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.cursor(), Cursor::at(0));
    }

    // --- Typing ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right, false);
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(2));
    }

    #[test]
    fn test_insert_char_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(6, 11);
        buf.insert_char('!');
        assert_eq!(buf.text(), "hello !");
        assert_eq!(buf.cursor(), Cursor::at(7));
    }

    #[test]
    fn test_insert_multibyte_char_advances_one_offset() {
        let mut buf = EditorBuffer::from_text("caf");
        buf.move_to_end(false);
        buf.insert_char('é');
        assert_eq!(buf.text(), "café");
        assert_eq!(buf.cursor(), Cursor::at(4));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.head_line_col(), (1, 0));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(5));
    }

    #[test]
    fn test_delete_back_removes_crlf_pair() {
        let mut buf = EditorBuffer::from_text("a\r\nb");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_delete_forward_removes_crlf_pair() {
        let mut buf = EditorBuffer::from_text("a\r\nb");
        buf.move_to(0, 1);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_right_steps_over_crlf_pair() {
        let mut buf = EditorBuffer::from_text("a\r\nb");
        buf.move_end(false);
        assert_eq!(buf.cursor(), Cursor::at(1));
        buf.move_cursor(Direction::Right, false);
        assert_eq!(buf.cursor(), Cursor::at(3));
        buf.insert_char('x');
        assert_eq!(buf.text(), "a\r\nxb");
    }

    #[test]
    fn test_left_steps_over_crlf_pair() {
        let mut buf = EditorBuffer::from_text("a\r\nb");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left, true);
        assert_eq!(buf.cursor(), Cursor::range(3, 1));
        assert_eq!(buf.selection().selected_text, "\r\n");
    }

    #[test]
    fn test_delete_forward_removes_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(0, 6);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "world");
        assert_eq!(buf.cursor(), Cursor::at(0));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to_end(false);
        assert!(!buf.delete_forward());
    }

    // --- Movement and selection ---

    #[test]
    fn test_shift_right_extends_selection() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Right, true);
        let sel = buf.selection();
        assert_eq!((sel.start, sel.end), (0, 2));
        assert_eq!(sel.selected_text, "he");
    }

    #[test]
    fn test_left_collapses_selection_to_start() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.set_selection(1, 4);
        buf.move_cursor(Direction::Left, false);
        assert_eq!(buf.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_backwards_selection_reports_ordered_bounds() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to_end(false);
        buf.move_word_left(true);
        let sel = buf.selection();
        assert_eq!((sel.start, sel.end), (0, 5));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.head_line_col(), (1, 2));
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.head_line_col(), (2, 4));
    }

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Up, false);
        assert_eq!(buf.head_line_col(), (0, 3));
    }

    #[test]
    fn test_home_and_end() {
        let mut buf = EditorBuffer::from_text("one\ntwo three");
        buf.move_to(1, 4);
        buf.move_home(false);
        assert_eq!(buf.cursor(), Cursor::at(4));
        buf.move_end(false);
        assert_eq!(buf.cursor(), Cursor::at(13));
    }

    #[test]
    fn test_word_movement() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_word_right(false);
        assert_eq!(buf.cursor().head, 6);
        buf.move_to(0, 8);
        buf.move_word_left(false);
        assert_eq!(buf.cursor().head, 6);
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(5));
    }

    #[test]
    fn test_select_all() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.select_all();
        assert_eq!(buf.selection().selected_text, "a\nb");
    }

    // --- Surface contract ---

    #[test]
    fn test_replace_content_clamps_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(8, 11);
        buf.replace_content(Rope::from_str("hi"));
        assert_eq!(buf.cursor(), Cursor::range(2, 2));
    }

    #[test]
    fn test_set_selection_orders_and_clamps() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.set_selection(2, 10);
        assert_eq!((buf.cursor().start(), buf.cursor().end()), (2, 3));
        buf.set_selection(3, 1);
        assert_eq!((buf.cursor().start(), buf.cursor().end()), (1, 1));
    }

    #[test]
    fn test_typing_run_undoes_as_one_step() {
        let mut buf = EditorBuffer::empty();
        for ch in "hey".chars() {
            buf.apply_input(InputEvent::Char(ch));
        }
        assert!(buf.undo());
        assert_eq!(buf.text(), "");
        assert!(buf.redo());
        assert_eq!(buf.text(), "hey");
    }

    #[test]
    fn test_cursor_movement_splits_typing_runs() {
        let mut buf = EditorBuffer::empty();
        buf.apply_input(InputEvent::Char('a'));
        buf.move_cursor(Direction::Left, false);
        buf.apply_input(InputEvent::Char('b'));
        assert_eq!(buf.text(), "ba");
        assert!(buf.undo());
        assert_eq!(buf.text(), "a");
    }

    #[test]
    fn test_replace_content_is_undoable() {
        let mut buf = EditorBuffer::from_text("old");
        buf.replace_content(Rope::from_str("new"));
        assert!(buf.undo());
        assert_eq!(buf.text(), "old");
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut buf = EditorBuffer::from_text("x");
        assert!(!buf.undo());
        assert!(!buf.redo());
    }

    #[test]
    fn test_movement_input_reports_no_change() {
        let mut buf = EditorBuffer::from_text("abc");
        let changed = buf.apply_input(InputEvent::Move {
            direction: Direction::Right,
            extend: false,
        });
        assert!(!changed);
        assert_eq!(buf.cursor(), Cursor::at(1));
    }
}
