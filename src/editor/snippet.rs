//! Toolbar actions and the markdown snippets they produce.
//!
//! [`transform`] is pure: it looks at the action and a selection snapshot
//! and says what should happen, without touching the buffer.

use std::fmt;
use std::str::FromStr;

use super::selection::Selection;

/// Fixed 3-column table inserted by [`ToolbarAction::Table`].
pub const TABLE_TEMPLATE: &str = "| Column 1 | Column 2 | Column 3 |
|----------|----------|----------|
| Cell 1   | Cell 2   | Cell 3   |
| Cell 4   | Cell 5   | Cell 6   |";

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Undo,
    Redo,
    Bold,
    Italic,
    Heading(HeadingLevel),
    UnorderedItem,
    OrderedItem,
    Blockquote,
    CodeBlock,
    Table,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    pub const fn level(self) -> usize {
        self as usize
    }
}

impl ToolbarAction {
    /// All actions, in toolbar order.
    pub const ALL: [Self; 13] = [
        Self::Undo,
        Self::Redo,
        Self::Bold,
        Self::Italic,
        Self::Heading(HeadingLevel::H1),
        Self::Heading(HeadingLevel::H2),
        Self::Heading(HeadingLevel::H3),
        Self::UnorderedItem,
        Self::OrderedItem,
        Self::Blockquote,
        Self::CodeBlock,
        Self::Table,
        Self::Link,
    ];

    /// The identifier the toolbar emits for this action.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Heading(HeadingLevel::H1) => "h1",
            Self::Heading(HeadingLevel::H2) => "h2",
            Self::Heading(HeadingLevel::H3) => "h3",
            Self::UnorderedItem => "ul",
            Self::OrderedItem => "ol",
            Self::Blockquote => "quote",
            Self::CodeBlock => "code",
            Self::Table => "table",
            Self::Link => "link",
        }
    }

    /// Human-readable button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Heading(HeadingLevel::H1) => "H1",
            Self::Heading(HeadingLevel::H2) => "H2",
            Self::Heading(HeadingLevel::H3) => "H3",
            Self::UnorderedItem => "Bullet List",
            Self::OrderedItem => "Numbered List",
            Self::Blockquote => "Quote",
            Self::CodeBlock => "Code Block",
            Self::Table => "Table",
            Self::Link => "Link",
        }
    }
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An identifier outside the toolbar's fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown toolbar action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for ToolbarAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Text to insert over a range of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionRequest {
    pub text: String,
    /// `(start, end)` char offsets replaced by `text`.
    pub range: (usize, usize),
}

/// What a toolbar action asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    Insert(InsertionRequest),
    /// Handed to the surface's native history.
    Undo,
    Redo,
}

/// Map an action and the current selection to a transform.
pub fn transform(action: ToolbarAction, selection: &Selection) -> Transform {
    match action {
        ToolbarAction::Undo => Transform::Undo,
        ToolbarAction::Redo => Transform::Redo,
        _ => Transform::Insert(InsertionRequest {
            text: snippet_text(action, &selection.selected_text).unwrap_or_default(),
            range: (selection.start, selection.end),
        }),
    }
}

/// The snippet for `action` wrapping `selected`, or its placeholder when
/// `selected` is empty. `None` for undo/redo.
pub fn snippet_text(action: ToolbarAction, selected: &str) -> Option<String> {
    let or = |placeholder: &'static str| {
        if selected.is_empty() {
            placeholder
        } else {
            selected
        }
    };
    let text = match action {
        ToolbarAction::Undo | ToolbarAction::Redo => return None,
        ToolbarAction::Bold => format!("**{}**", or("bold text")),
        ToolbarAction::Italic => format!("*{}*", or("italic text")),
        ToolbarAction::Heading(level) => {
            let n = level.level();
            let hashes = "#".repeat(n);
            if selected.is_empty() {
                format!("{hashes} Heading {n}")
            } else {
                format!("{hashes} {selected}")
            }
        }
        ToolbarAction::UnorderedItem => format!("- {}", or("List item")),
        ToolbarAction::OrderedItem => format!("1. {}", or("List item")),
        ToolbarAction::Blockquote => format!("> {}", or("Quote text")),
        ToolbarAction::CodeBlock => format!("```\n{}\n```", or("code here")),
        ToolbarAction::Table => TABLE_TEMPLATE.to_string(),
        ToolbarAction::Link => format!("[{}](url)", or("link text")),
    };
    Some(text)
}
