use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::Model;
use crate::editor::{EditorBuffer, SelectionModel};
use crate::ui::style::Theme;

use super::status;

/// Split the main area into the editor (left) and preview (right) panes.
pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = model.palette();
    frame.render_widget(Block::default().style(theme.base), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    status::render_toolbar(model, &theme, frame, rows[0]);
    let panes = split_panes(rows[1]);
    render_editor(model, &theme, frame, panes[0]);
    render_preview(model, &theme, frame, panes[1]);
    status::render_status_bar(model, &theme, frame, rows[2]);
    if model.prompt.is_some() {
        status::render_prompt_bar(model, &theme, frame, rows[3]);
    } else {
        status::render_toast_bar(model, frame, rows[3]);
    }
}

fn pane<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.pane_border)
        .title(Span::styled(format!(" {title} "), theme.pane_title))
        .style(theme.base)
}

fn render_editor(model: &mut Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = pane("Editor", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(buf) = model.editor.surface() else {
        return;
    };
    let gutter_width = usize::from(line_number_width(buf.line_count())) + 1;
    let text_width = usize::from(inner.width)
        .saturating_sub(gutter_width)
        .max(1);
    let (_, head_col) = buf.head_line_col();
    model.editor_col_offset = visible_col_offset(model.editor_col_offset, head_col, text_width);

    let lines = editor_lines(
        buf,
        theme,
        (model.editor_scroll_offset, model.editor_col_offset),
        usize::from(inner.height),
    );
    frame.render_widget(Paragraph::new(lines).style(theme.base), inner);
}

/// Column offset that keeps the caret column inside a `width`-column view.
pub(super) fn visible_col_offset(offset: usize, col: usize, width: usize) -> usize {
    if col < offset {
        col
    } else if col >= offset + width {
        col + 1 - width
    } else {
        offset
    }
}

/// Gutter plus text for the visible buffer lines, with the selection and
/// caret highlighted. `scroll` is the first visible `(line, column)`.
fn editor_lines(
    buf: &EditorBuffer,
    theme: &Theme,
    scroll: (usize, usize),
    height: usize,
) -> Vec<Line<'static>> {
    let (scroll_line, scroll_col) = scroll;
    let total_lines = buf.line_count();
    let gutter_width = usize::from(line_number_width(total_lines));
    let selection = buf.selection();
    let head = buf.cursor().head;
    let (head_line, _) = buf.head_line_col();

    let start = scroll_line.min(total_lines.saturating_sub(1));
    let end = (start + height).min(total_lines);
    let mut lines = Vec::with_capacity(end - start);
    for line_idx in start..end {
        let gutter_style = if line_idx == head_line {
            theme.gutter_current
        } else {
            theme.gutter
        };
        let mut spans = vec![Span::styled(
            format!("{:>gutter_width$} ", line_idx + 1),
            gutter_style,
        )];

        let line_start = buf.line_start(line_idx);
        let text = buf.line_at(line_idx).unwrap_or_default();
        let line_end = line_start + text.chars().count();
        let mut run = String::new();
        let mut run_style = theme.base;
        let mut offset = line_start;
        for ch in text.chars().chain(std::iter::once(' ')) {
            let is_eol = offset == line_end;
            if is_eol && offset != head {
                break;
            }
            if offset - line_start < scroll_col {
                offset += 1;
                continue;
            }
            let style = if offset == head {
                theme.cursor
            } else if offset >= selection.start && offset < selection.end && !is_eol {
                theme.selection
            } else {
                theme.base
            };
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            run.push(if ch == '\t' { ' ' } else { ch });
            offset += 1;
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn render_preview(model: &mut Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = pane("Preview", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = usize::from(inner.height);
    let lines = model.preview_lines(inner.width).to_vec();
    let max_scroll = lines.len().saturating_sub(visible);
    if model.preview_scroll_offset > max_scroll {
        model.preview_scroll_offset = max_scroll;
    }
    let scroll = u16::try_from(model.preview_scroll_offset).unwrap_or(u16::MAX);
    let preview = Paragraph::new(lines)
        .style(theme.base)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(preview, inner);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
