use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::text::Line;

use crate::config::ThemeMode;
use crate::editor::{EditSurface, EditorBuffer, TextBufferController};
use crate::ui::style::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the bottom-row prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A toolbar identifier or app command (`bold`, `export`, `import notes.md`)
    Command,
    /// A path to import
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// File work requested by `update`, carried out by the effects layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoRequest {
    Import(PathBuf),
    Export,
}

#[derive(Debug)]
struct PreviewCache {
    revision: u64,
    theme: ThemeMode,
    width: u16,
    lines: Vec<Line<'static>>,
}

/// The complete application state.
pub struct Model {
    /// The document buffer and its editing surface
    pub editor: TextBufferController,
    pub theme: ThemeMode,
    pub prompt: Option<Prompt>,
    /// First buffer line shown in the editor pane
    pub editor_scroll_offset: usize,
    /// First char column shown in the editor pane
    pub editor_col_offset: usize,
    /// First rendered line shown in the preview pane
    pub preview_scroll_offset: usize,
    pub terminal_size: (u16, u16),
    /// Whether an import worker is running
    pub import_in_flight: bool,
    pub should_quit: bool,
    pub(super) io_request: Option<IoRequest>,
    toast: Option<Toast>,
    preview: Option<PreviewCache>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("chars", &self.editor.len_chars())
            .field("revision", &self.editor.revision())
            .field("theme", &self.theme)
            .field("prompt", &self.prompt)
            .field("editor_scroll_offset", &self.editor_scroll_offset)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model with `content` loaded into a focused editing surface.
    pub fn new(content: &str, theme: ThemeMode, terminal_size: (u16, u16)) -> Self {
        let mut editor = TextBufferController::new(content);
        let mut surface = EditorBuffer::empty();
        surface.focus();
        editor.attach(surface);
        Self {
            editor,
            theme,
            prompt: None,
            editor_scroll_offset: 0,
            editor_col_offset: 0,
            preview_scroll_offset: 0,
            terminal_size,
            import_in_flight: false,
            should_quit: false,
            io_request: None,
            toast: None,
            preview: None,
        }
    }

    pub fn palette(&self) -> Theme {
        Theme::for_mode(self.theme)
    }

    /// Line and column of the caret, both zero-based.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        self.editor
            .surface()
            .map_or((0, 0), EditorBuffer::head_line_col)
    }

    /// Scroll the editor pane so the caret line is visible.
    pub fn ensure_cursor_visible(&mut self) {
        let height = crate::ui::editor_viewport_height(self.terminal_size.1).max(1);
        let (line, _) = self.cursor_line_col();
        if line < self.editor_scroll_offset {
            self.editor_scroll_offset = line;
        } else if line >= self.editor_scroll_offset + height {
            self.editor_scroll_offset = line + 1 - height;
        }
    }

    /// Rendered preview for a pane `width` columns wide, re-rendered only
    /// when the buffer, theme or width changed.
    pub fn preview_lines(&mut self, width: u16) -> &[Line<'static>] {
        let revision = self.editor.revision();
        let stale = self.preview.as_ref().is_none_or(|cache| {
            cache.revision != revision || cache.theme != self.theme || cache.width != width
        });
        if stale {
            let lines =
                crate::preview::render_preview(&self.editor.content(), &self.palette(), width);
            self.preview = Some(PreviewCache {
                revision,
                theme: self.theme,
                width,
                lines,
            });
        }
        self.preview
            .as_ref()
            .map_or(&[][..], |cache| cache.lines.as_slice())
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new("", ThemeMode::default(), (80, 24))
    }
}
