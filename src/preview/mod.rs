//! Markdown preview rendered to styled terminal lines.
//!
//! comrak parses the buffer with the GFM extensions enabled; the AST is
//! walked once into ratatui [`Line`]s. Fenced code goes through
//! [`crate::highlight`] in the syntect theme matching the UI theme.

mod table;

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::ui::style::Theme;

/// Text shown when the buffer is empty.
pub const PLACEHOLDER: &str = "Preview will appear here...";

/// Render `source` for a pane `width` columns wide.
pub fn render_preview(source: &str, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    if source.trim().is_empty() {
        return vec![Line::from(Span::styled(PLACEHOLDER, theme.placeholder))];
    }

    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());
    let mut renderer = Renderer {
        theme,
        width: usize::from(width.max(1)),
        lines: Vec::new(),
        last_blank: true,
    };
    let mut prefix = Prefix::new(theme.base);
    renderer.block(root, &mut prefix, false);
    tracing::trace!(lines = renderer.lines.len(), "preview.render");
    renderer.lines
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// Leading spans for block content: list markers and quote bars.
///
/// `first` is used once, by the first line emitted inside the block,
/// then every later line gets `rest`.
#[derive(Debug, Clone)]
struct Prefix {
    first: Vec<Span<'static>>,
    rest: Vec<Span<'static>>,
    text: Style,
}

impl Prefix {
    const fn new(text: Style) -> Self {
        Self {
            first: Vec::new(),
            rest: Vec::new(),
            text,
        }
    }

    fn take(&mut self) -> Vec<Span<'static>> {
        std::mem::replace(&mut self.first, self.rest.clone())
    }

    fn nested(&mut self, first: Span<'static>, rest: Span<'static>, text: Style) -> Self {
        let mut head = self.take();
        head.push(first);
        let mut tail = self.rest.clone();
        tail.push(rest);
        Self {
            first: head,
            rest: tail,
            text,
        }
    }
}

struct Renderer<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    last_blank: bool,
}

impl Renderer<'_> {
    fn push(&mut self, prefix: &mut Prefix, spans: Vec<Span<'static>>) {
        let mut line = prefix.take();
        line.extend(spans);
        self.lines.push(Line::from(line));
        self.last_blank = false;
    }

    /// Separate blocks with one blank line.
    fn gap(&mut self, prefix: &Prefix, tight: bool) {
        if tight || self.last_blank {
            return;
        }
        self.lines.push(Line::from(prefix.rest.clone()));
        self.last_blank = true;
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>, prefix: &mut Prefix, tight: bool) {
        match &node.data.borrow().value {
            NodeValue::Document => {
                for child in node.children() {
                    self.block(child, prefix, false);
                }
            }
            NodeValue::Heading(heading) => {
                self.gap(prefix, tight);
                let style = self.theme.heading(heading.level);
                let mut spans = vec![Span::styled(
                    format!("{} ", "#".repeat(usize::from(heading.level))),
                    style,
                )];
                for line in self.inline_lines(node, style) {
                    spans.extend(line);
                }
                self.push(prefix, spans);
            }
            NodeValue::Paragraph => {
                self.gap(prefix, tight);
                for line in self.inline_lines(node, prefix.text) {
                    self.push(prefix, line);
                }
            }
            NodeValue::CodeBlock(code_block) => {
                self.gap(prefix, tight);
                let language = code_block.info.split_whitespace().next();
                let bar = Span::styled("▎ ", self.theme.table_border);
                self.push(
                    prefix,
                    vec![
                        bar.clone(),
                        Span::styled(
                            language.unwrap_or("code").to_string(),
                            self.theme.pane_title,
                        ),
                    ],
                );
                let highlighted = crate::highlight::highlight_code(
                    language,
                    &code_block.literal,
                    self.theme.mode,
                    self.theme.code,
                );
                for spans in highlighted {
                    let mut line = vec![bar.clone()];
                    line.extend(spans);
                    self.push(prefix, line);
                }
            }
            NodeValue::HtmlBlock(html) => {
                self.gap(prefix, tight);
                for line in html.literal.lines() {
                    self.push(prefix, vec![Span::styled(line.to_string(), self.theme.code)]);
                }
            }
            NodeValue::List(list) => {
                self.gap(prefix, tight);
                let number_width = (list.start + node.children().count().saturating_sub(1))
                    .to_string()
                    .len();
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                for (index, item) in node.children().enumerate() {
                    let task = match &item.data.borrow().value {
                        NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
                        _ => None,
                    };
                    let marker = match (task, list.list_type) {
                        (Some(true), _) => "☑ ".to_string(),
                        (Some(false), _) => "☐ ".to_string(),
                        (None, ListType::Bullet) => "• ".to_string(),
                        (None, ListType::Ordered) => {
                            format!("{:>number_width$}{delimiter} ", list.start + index)
                        }
                    };
                    let indent = " ".repeat(marker.width());
                    let mut item_prefix = prefix.nested(
                        Span::styled(marker, self.theme.list_marker),
                        Span::styled(indent, prefix.text),
                        prefix.text,
                    );
                    let mut first = true;
                    for child in item.children() {
                        self.block(child, &mut item_prefix, list.tight || first);
                        first = false;
                    }
                }
            }
            NodeValue::BlockQuote => {
                self.gap(prefix, tight);
                let bar = Span::styled("│ ", self.theme.quote);
                let mut quote_prefix = prefix.nested(bar.clone(), bar, self.theme.quote);
                let mut first = true;
                for child in node.children() {
                    self.block(child, &mut quote_prefix, first);
                    first = false;
                }
            }
            NodeValue::ThematicBreak => {
                self.gap(prefix, tight);
                let rule = "─".repeat(self.width.min(40));
                self.push(prefix, vec![Span::styled(rule, self.theme.hr)]);
            }
            NodeValue::Table(_) => {
                self.gap(prefix, tight);
                for spans in table::render_table(node, self.theme) {
                    self.push(prefix, spans);
                }
            }
            _ => {
                for child in node.children() {
                    self.block(child, prefix, tight);
                }
            }
        }
    }

    /// Inline content of `node`, split at hard line breaks.
    fn inline_lines<'a>(&self, node: &'a AstNode<'a>, style: Style) -> Vec<Vec<Span<'static>>> {
        let mut lines = vec![Vec::new()];
        for child in node.children() {
            self.inline(child, style, &mut lines);
        }
        lines
    }

    fn inline<'a>(&self, node: &'a AstNode<'a>, style: Style, lines: &mut Vec<Vec<Span<'static>>>) {
        let push = |lines: &mut Vec<Vec<Span<'static>>>, span: Span<'static>| {
            if let Some(last) = lines.last_mut() {
                last.push(span);
            }
        };
        match &node.data.borrow().value {
            NodeValue::Text(text) => push(lines, Span::styled(text.to_string(), style)),
            NodeValue::Code(code) => push(
                lines,
                Span::styled(code.literal.to_string(), self.theme.inline_code),
            ),
            NodeValue::HtmlInline(html) => push(lines, Span::styled(html.to_string(), style)),
            NodeValue::SoftBreak => push(lines, Span::styled(" ", style)),
            NodeValue::LineBreak => lines.push(Vec::new()),
            NodeValue::Image(image) => {
                let alt = table::plain_text(node);
                let label = if alt.is_empty() { &image.url } else { &alt };
                push(lines, Span::styled(format!("[image: {label}]"), self.theme.link));
            }
            value => {
                let next = match value {
                    NodeValue::Emph => style.add_modifier(Modifier::ITALIC),
                    NodeValue::Strong => style.add_modifier(Modifier::BOLD),
                    NodeValue::Strikethrough => style.add_modifier(Modifier::CROSSED_OUT),
                    NodeValue::Link(_) => style.patch(self.theme.link),
                    _ => style,
                };
                for child in node.children() {
                    self.inline(child, next, lines);
                }
            }
        }
    }
}
