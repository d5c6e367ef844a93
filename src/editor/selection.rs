use ropey::Rope;

/// Point-in-time snapshot of the editing surface's selection.
///
/// Valid only until the next mutation; callers re-query instead of caching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Inclusive start, in chars.
    pub start: usize,
    /// Exclusive end, in chars. Always `>= start`.
    pub end: usize,
    /// `content[start, end)`.
    pub selected_text: String,
}

impl Selection {
    /// The zero selection reported when no surface is attached.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot `[start, end)` of `rope`, clamping both bounds.
    pub fn of(rope: &Rope, start: usize, end: usize) -> Self {
        let len = rope.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        Self {
            start,
            end,
            selected_text: rope.slice(start..end).to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Live query of the current selection.
pub trait SelectionModel {
    fn selection(&self) -> Selection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_zero() {
        let sel = Selection::empty();
        assert_eq!((sel.start, sel.end, sel.selected_text.as_str()), (0, 0, ""));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_of_extracts_substring_by_char_offsets() {
        let rope = Rope::from_str("héllo wörld");
        let sel = Selection::of(&rope, 6, 11);
        assert_eq!(sel.selected_text, "wörld");
        assert_eq!(sel.len(), 5);
    }

    #[test]
    fn test_of_clamps_out_of_range_bounds() {
        let rope = Rope::from_str("abc");
        let sel = Selection::of(&rope, 5, 9);
        assert_eq!((sel.start, sel.end), (3, 3));
        assert!(sel.selected_text.is_empty());
    }
}
