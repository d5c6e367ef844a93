use std::path::{Path, PathBuf};

use crate::app::Model;
use crate::app::model::{IoRequest, Prompt, PromptKind, ToastLevel};
use crate::editor::{InputEvent, ToolbarAction};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Raw keystroke for the editing surface
    Input(InputEvent),
    /// Tab: insert the indentation unit
    Indent,
    /// Toolbar button (formatting snippet, undo or redo)
    Toolbar(ToolbarAction),
    /// A command line: a toolbar identifier or an app command
    Command(String),

    // Prompt
    /// Open the bottom-row prompt
    OpenPrompt(PromptKind),
    /// Replace the prompt's input text
    PromptInput(String),
    /// Run the prompt's input
    PromptSubmit,
    /// Close the prompt without running it
    PromptCancel,

    // Files
    /// Import the file at this path into the buffer
    Import(PathBuf),
    /// The import worker finished
    ImportFinished {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// Write the buffer to a new export file
    Export,

    // View
    ToggleTheme,
    PreviewScrollUp(usize),
    PreviewScrollDown(usize),
    Resize(u16, u16),
    Quit,
}

/// What a command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Import(PathBuf),
    Export,
    ToggleTheme,
    Quit,
    /// Anything else is taken as a toolbar identifier
    Named(String),
}

impl Command {
    /// Parse a command line. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim()));
        Some(match head {
            "import" | "open" if !rest.is_empty() => Self::Import(PathBuf::from(rest)),
            "export" => Self::Export,
            "theme" => Self::ToggleTheme,
            "quit" => Self::Quit,
            _ => Self::Named(line.to_string()),
        })
    }
}

/// Pure state transition. File and storage work happens afterwards in the
/// effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Input(input) => {
            model.editor.handle_input(input);
            model.ensure_cursor_visible();
        }
        Message::Indent => {
            model.editor.insert_indent();
        }
        Message::Toolbar(action) => {
            model.editor.apply_action(action);
            model.ensure_cursor_visible();
        }
        Message::Command(line) => run_command(&mut model, &line),

        Message::OpenPrompt(kind) => {
            model.prompt = Some(Prompt {
                kind,
                input: String::new(),
            });
        }
        Message::PromptInput(text) => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input = text;
            }
        }
        Message::PromptSubmit => {
            if let Some(prompt) = model.prompt.take() {
                match prompt.kind {
                    PromptKind::Command => run_command(&mut model, &prompt.input),
                    PromptKind::Open => {
                        let path = prompt.input.trim();
                        if !path.is_empty() {
                            request_import(&mut model, PathBuf::from(path));
                        }
                    }
                }
            }
        }
        Message::PromptCancel => model.prompt = None,

        Message::Import(path) => request_import(&mut model, path),
        Message::ImportFinished { path, result } => {
            model.import_in_flight = false;
            match result {
                Ok(content) => {
                    model.editor.set_content(&content);
                    model.editor_scroll_offset = 0;
                    model.editor_col_offset = 0;
                    model.preview_scroll_offset = 0;
                    model.ensure_cursor_visible();
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Imported {}", display_name(&path)),
                    );
                }
                Err(message) => model.show_toast(ToastLevel::Error, message),
            }
        }
        Message::Export => model.io_request = Some(IoRequest::Export),

        Message::ToggleTheme => model.theme = model.theme.toggled(),
        Message::PreviewScrollUp(n) => {
            model.preview_scroll_offset = model.preview_scroll_offset.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            model.preview_scroll_offset = model.preview_scroll_offset.saturating_add(n);
        }
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }
        Message::Quit => model.should_quit = true,
    }

    model
}

fn run_command(model: &mut Model, line: &str) {
    let Some(command) = Command::parse(line) else {
        return;
    };
    match command {
        Command::Import(path) => request_import(model, path),
        Command::Export => model.io_request = Some(IoRequest::Export),
        Command::ToggleTheme => model.theme = model.theme.toggled(),
        Command::Quit => model.should_quit = true,
        Command::Named(name) => {
            model.editor.apply_named_action(&name);
            model.ensure_cursor_visible();
        }
    }
}

fn request_import(model: &mut Model, path: PathBuf) {
    if model.import_in_flight {
        model.show_toast(ToastLevel::Warning, "An import is already running");
        return;
    }
    model.import_in_flight = true;
    model.io_request = Some(IoRequest::Import(path));
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
