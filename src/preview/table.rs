use comrak::nodes::{AstNode, NodeValue, TableAlignment};
use ratatui::style::Modifier;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::ui::style::Theme;

/// Box-drawn rows for a GFM table node, columns padded to display width.
pub(super) fn render_table<'a>(node: &'a AstNode<'a>, theme: &Theme) -> Vec<Vec<Span<'static>>> {
    let (alignments, rows, has_header) = collect_rows(node);
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }
    let mut widths = vec![1; columns];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let border = |left: char, middle: char, right: char| {
        vec![Span::styled(
            border_line(&widths, left, middle, right),
            theme.table_border,
        )]
    };

    let mut out = vec![border('┌', '┬', '┐')];
    for (row_idx, row) in rows.iter().enumerate() {
        let header = has_header && row_idx == 0;
        let text_style = if header {
            theme.base.add_modifier(Modifier::BOLD)
        } else {
            theme.base
        };
        let mut spans = vec![Span::styled("│", theme.table_border)];
        for (idx, width) in widths.iter().enumerate() {
            let cell = row.get(idx).map_or("", String::as_str);
            let align = alignments.get(idx).copied().unwrap_or(TableAlignment::None);
            spans.push(Span::styled(
                format!(" {} ", pad(cell, *width, align)),
                text_style,
            ));
            spans.push(Span::styled("│", theme.table_border));
        }
        out.push(spans);
        if header {
            out.push(border('├', '┼', '┤'));
        }
    }
    out.push(border('└', '┴', '┘'));
    out
}

/// Concatenated text of every descendant.
pub(super) fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                collect_text(child, text);
            }
        }
    }
}

fn collect_rows<'a>(node: &'a AstNode<'a>) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in node.children() {
        let header = match &row_node.data.borrow().value {
            NodeValue::TableRow(header) => *header,
            _ => continue,
        };
        has_header |= header;
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                plain_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }
    (alignments, rows, has_header)
}

fn border_line(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn pad(content: &str, width: usize, align: TableAlignment) -> String {
    let padding = width.saturating_sub(content.width());
    match align {
        TableAlignment::Right => format!("{}{content}", " ".repeat(padding)),
        TableAlignment::Center => {
            let left = padding / 2;
            format!("{}{content}{}", " ".repeat(left), " ".repeat(padding - left))
        }
        TableAlignment::Left | TableAlignment::None => {
            format!("{content}{}", " ".repeat(padding))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_alignments() {
        assert_eq!(pad("ab", 6, TableAlignment::Left), "ab    ");
        assert_eq!(pad("ab", 6, TableAlignment::Right), "    ab");
        assert_eq!(pad("ab", 6, TableAlignment::Center), "  ab  ");
    }

    #[test]
    fn test_pad_counts_wide_chars() {
        assert_eq!(pad("日本", 5, TableAlignment::None), "日本 ");
    }

    #[test]
    fn test_border_line() {
        assert_eq!(border_line(&[1, 2], '┌', '┬', '┐'), "┌───┬────┐");
    }
}
