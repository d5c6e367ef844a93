use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::model::{Prompt, PromptKind};
use crate::app::{Message, Model};
use crate::editor::snippet::HeadingLevel;
use crate::editor::{Direction, InputEvent, ToolbarAction};

const PREVIEW_PAGE: usize = 10;

/// Map a terminal event to a message.
pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) => handle_key(*key, model),
        Event::Paste(text) if model.prompt.is_none() => {
            Some(Message::Input(InputEvent::Paste(text.clone())))
        }
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        _ => None,
    }
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if let Some(prompt) = &model.prompt {
        return handle_prompt_key(key, prompt);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        return match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('z') => Some(Message::Toolbar(ToolbarAction::Undo)),
            KeyCode::Char('y') => Some(Message::Toolbar(ToolbarAction::Redo)),
            KeyCode::Char('e') => Some(Message::Export),
            KeyCode::Char('o') => Some(Message::OpenPrompt(PromptKind::Open)),
            KeyCode::Char('p') => Some(Message::OpenPrompt(PromptKind::Command)),
            KeyCode::Char('t') => Some(Message::ToggleTheme),
            KeyCode::Char('a') => Some(Message::Input(InputEvent::SelectAll)),
            KeyCode::Left => Some(Message::Input(InputEvent::WordLeft { extend: shift })),
            KeyCode::Right => Some(Message::Input(InputEvent::WordRight { extend: shift })),
            KeyCode::Home => Some(Message::Input(InputEvent::DocumentStart { extend: shift })),
            KeyCode::End => Some(Message::Input(InputEvent::DocumentEnd { extend: shift })),
            _ => None,
        };
    }

    if alt {
        return match key.code {
            KeyCode::Char(ch) => formatting_action(ch).map(Message::Toolbar),
            KeyCode::Up => Some(Message::PreviewScrollUp(1)),
            KeyCode::Down => Some(Message::PreviewScrollDown(1)),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Tab => return Some(Message::Indent),
        KeyCode::PageUp => return Some(Message::PreviewScrollUp(PREVIEW_PAGE)),
        KeyCode::PageDown => return Some(Message::PreviewScrollDown(PREVIEW_PAGE)),
        KeyCode::Char(ch) => InputEvent::Char(ch),
        KeyCode::Enter => InputEvent::Newline,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Delete => InputEvent::Delete,
        KeyCode::Left => arrow(Direction::Left, shift),
        KeyCode::Right => arrow(Direction::Right, shift),
        KeyCode::Up => arrow(Direction::Up, shift),
        KeyCode::Down => arrow(Direction::Down, shift),
        KeyCode::Home => InputEvent::Home { extend: shift },
        KeyCode::End => InputEvent::End { extend: shift },
        _ => return None,
    };
    Some(Message::Input(input))
}

fn handle_prompt_key(key: KeyEvent, prompt: &Prompt) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::PromptCancel),
        KeyCode::Enter => Some(Message::PromptSubmit),
        KeyCode::Backspace => {
            let mut input = prompt.input.clone();
            input.pop();
            Some(Message::PromptInput(input))
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::PromptInput(format!("{}{ch}", prompt.input)))
        }
        _ => None,
    }
}

const fn arrow(direction: Direction, extend: bool) -> InputEvent {
    InputEvent::Move { direction, extend }
}

const fn formatting_action(ch: char) -> Option<ToolbarAction> {
    Some(match ch {
        'b' => ToolbarAction::Bold,
        'i' => ToolbarAction::Italic,
        '1' => ToolbarAction::Heading(HeadingLevel::H1),
        '2' => ToolbarAction::Heading(HeadingLevel::H2),
        '3' => ToolbarAction::Heading(HeadingLevel::H3),
        'u' => ToolbarAction::UnorderedItem,
        'o' => ToolbarAction::OrderedItem,
        'q' => ToolbarAction::Blockquote,
        'c' => ToolbarAction::CodeBlock,
        't' => ToolbarAction::Table,
        'l' => ToolbarAction::Link,
        _ => return None,
    })
}

/// Key hint shown next to a toolbar button.
pub const fn shortcut_label(action: ToolbarAction) -> &'static str {
    match action {
        ToolbarAction::Undo => "^Z",
        ToolbarAction::Redo => "^Y",
        ToolbarAction::Bold => "M-b",
        ToolbarAction::Italic => "M-i",
        ToolbarAction::Heading(HeadingLevel::H1) => "M-1",
        ToolbarAction::Heading(HeadingLevel::H2) => "M-2",
        ToolbarAction::Heading(HeadingLevel::H3) => "M-3",
        ToolbarAction::UnorderedItem => "M-u",
        ToolbarAction::OrderedItem => "M-o",
        ToolbarAction::Blockquote => "M-q",
        ToolbarAction::CodeBlock => "M-c",
        ToolbarAction::Table => "M-t",
        ToolbarAction::Link => "M-l",
    }
}
