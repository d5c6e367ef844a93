use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, PromptKind, ToastLevel, shortcut_label};
use crate::editor::ToolbarAction;
use crate::ui::style::Theme;

pub fn render_toolbar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(" ", theme.toolbar)];
    for action in ToolbarAction::ALL {
        let enabled = match action {
            ToolbarAction::Undo => model.editor.can_undo(),
            ToolbarAction::Redo => model.editor.can_redo(),
            _ => true,
        };
        let (key_style, label_style) = if enabled {
            (theme.toolbar_key, theme.toolbar)
        } else {
            let dim = theme.toolbar.add_modifier(Modifier::DIM);
            (dim, dim)
        };
        spans.push(Span::styled(shortcut_label(action), key_style));
        spans.push(Span::styled(format!(" {}  ", action.label()), label_style));
    }
    let bar = Paragraph::new(Line::from(spans)).style(theme.toolbar);
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let (line, col) = model.cursor_line_col();
    let importing = if model.import_in_flight {
        "  [importing]"
    } else {
        ""
    };
    let status = format!(
        " mdpad  Ln {}, Col {}  {} chars  [{}]{importing}  ^P:command ^O:import ^E:export ^T:theme ^Q:quit",
        line + 1,
        col + 1,
        model.editor.len_chars(),
        model.theme.as_str(),
    );
    let status_bar = Paragraph::new(status).style(theme.status);
    frame.render_widget(status_bar, area);
}

pub fn render_prompt_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let Some(prompt) = &model.prompt else {
        return;
    };
    let label = match prompt.kind {
        PromptKind::Command => ":",
        PromptKind::Open => "Import file: ",
    };
    let text = format!("{label}{}_  Enter: run  Esc: cancel", prompt.input);
    let bar = Paragraph::new(text).style(theme.prompt);
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
