//! Syntax highlighting for fenced code blocks in the preview.
//!
//! Uses syntect with the bundled Sublime Text syntaxes and themes.

use std::sync::OnceLock;

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::config::ThemeMode;

/// Highlight `code` as `language`, one span list per source line.
///
/// Unknown or missing languages come back as plain spans styled with
/// `base`, with no foreground override.
pub fn highlight_code(
    language: Option<&str>,
    code: &str,
    mode: ThemeMode,
    base: Style,
) -> Vec<Vec<Span<'static>>> {
    let syntax_set = syntax_set();
    let syntax = language
        .filter(|lang| !lang.is_empty())
        .and_then(|lang| {
            syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| syntax_set.find_syntax_by_name(lang))
        });

    let Some(syntax) = syntax else {
        return code
            .lines()
            .map(|line| vec![Span::styled(line.to_string(), base)])
            .collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme(mode));
    code.lines()
        .map(|line| {
            let ranges = highlighter
                .highlight_line(line, syntax_set)
                .unwrap_or_default();
            ranges
                .into_iter()
                .map(|(style, text)| {
                    let fg = adjust_fg(
                        (style.foreground.r, style.foreground.g, style.foreground.b),
                        mode,
                    );
                    Span::styled(text.to_string(), base.fg(fg))
                })
                .collect()
        })
        .collect()
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        tracing::debug!("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme(mode: ThemeMode) -> &'static Theme {
    static LIGHT: OnceLock<Theme> = OnceLock::new();
    static DARK: OnceLock<Theme> = OnceLock::new();
    let cell = match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    };
    cell.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        let preferred = match mode {
            ThemeMode::Dark => [
                "Monokai Extended",
                "base16-ocean.dark",
                "Solarized (dark)",
            ]
            .as_slice(),
            ThemeMode::Light => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"]
                .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn adjust_fg((r, g, b): (u8, u8, u8), mode: ThemeMode) -> Color {
    if mode == ThemeMode::Dark {
        return Color::Rgb(r, g, b);
    }
    let luma = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
    if luma < 155.0 {
        return Color::Rgb(r, g, b);
    }
    let darken = |c: u8| (f32::from(c) * 0.42).round() as u8;
    Color::Rgb(darken(r), darken(g), darken(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let code = "fn main() {\n    let x = 1;\n}\n";
        let lines = highlight_code(Some("rust"), code, ThemeMode::Dark, Style::default());

        assert_eq!(lines.len(), 3);
        let has_color = lines.iter().flatten().any(|span| span.style.fg.is_some());
        assert!(has_color, "Expected at least one colored span for Rust");
    }

    #[test]
    fn test_highlight_unknown_language_falls_back_to_plain() {
        let lines = highlight_code(Some("nope"), "just text", ThemeMode::Light, Style::default());

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 1);
        assert_eq!(lines[0][0].content, "just text");
        assert!(lines[0][0].style.fg.is_none());
    }

    #[test]
    fn test_highlight_keeps_base_background() {
        let base = Style::default().bg(Color::Black);
        let lines = highlight_code(Some("rust"), "fn main() {}", ThemeMode::Dark, base);
        assert!(
            lines
                .iter()
                .flatten()
                .all(|span| span.style.bg == Some(Color::Black))
        );
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let Color::Rgb(r, g, b) = adjust_fg((240, 230, 120), ThemeMode::Light) else {
            panic!("expected rgb");
        };
        assert!(r < 240 && g < 230 && b < 120);
    }

    #[test]
    fn test_dark_mode_keeps_fg() {
        assert_eq!(
            adjust_fg((240, 230, 120), ThemeMode::Dark),
            Color::Rgb(240, 230, 120)
        );
    }
}
