//! Snapshot-based undo/redo for the editing surface.
//!
//! Ropes share structure on clone, so a snapshot per edit group is cheap.

use ropey::Rope;

use super::buffer::Cursor;

/// Maximum number of undo steps kept.
const HISTORY_LIMIT: usize = 500;

/// Kind of edit being recorded, used to coalesce typing runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A single non-whitespace character typed at a collapsed cursor.
    Typing,
    /// Backspace/Delete.
    Deletion,
    /// Anything else: paste, newline, programmatic replacement.
    Replace,
}

/// State restored by undo/redo.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub rope: Rope,
    pub cursor: Cursor,
}

#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    last_kind: Option<EditKind>,
}

impl History {
    /// Record the state *before* an edit of `kind`.
    ///
    /// Consecutive typing or deletion edits coalesce into one undo step.
    pub fn record(&mut self, kind: EditKind, rope: &Rope, cursor: Cursor) {
        let coalesce = kind != EditKind::Replace && self.last_kind == Some(kind);
        if !coalesce {
            self.undo.push(Snapshot {
                rope: rope.clone(),
                cursor,
            });
            if self.undo.len() > HISTORY_LIMIT {
                self.undo.remove(0);
            }
        }
        self.redo.clear();
        self.last_kind = Some(kind);
    }

    /// End the current typing run (e.g. after cursor movement).
    pub const fn break_run(&mut self) {
        self.last_kind = None;
    }

    /// Pop the last undo step, stashing `current` for redo.
    pub fn undo(&mut self, current: &Rope, cursor: Cursor) -> Option<Snapshot> {
        let snapshot = self.undo.pop()?;
        self.redo.push(Snapshot {
            rope: current.clone(),
            cursor,
        });
        self.last_kind = None;
        Some(snapshot)
    }

    /// Pop the last redo step, stashing `current` for undo.
    pub fn redo(&mut self, current: &Rope, cursor: Cursor) -> Option<Snapshot> {
        let snapshot = self.redo.pop()?;
        self.undo.push(Snapshot {
            rope: current.clone(),
            cursor,
        });
        self.last_kind = None;
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
