//! Colors for both UI themes.
//!
//! Indexed ANSI colors are used so the palette follows the terminal's own
//! color scheme where it can.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Styles for every element the editor and preview draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Pane background and default text
    pub base: Style,
    pub pane_border: Style,
    pub pane_title: Style,
    pub gutter: Style,
    pub gutter_current: Style,
    pub selection: Style,
    pub cursor: Style,
    pub toolbar: Style,
    pub toolbar_key: Style,
    pub status: Style,
    pub prompt: Style,
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    pub h4: Style,
    pub code: Style,
    pub inline_code: Style,
    pub quote: Style,
    pub link: Style,
    pub list_marker: Style,
    pub table_border: Style,
    pub hr: Style,
    pub placeholder: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        let base = Style::default().fg(Color::Indexed(235)).bg(Color::Indexed(255));
        Self {
            mode: ThemeMode::Light,
            base,
            pane_border: base.fg(Color::Indexed(250)),
            pane_title: base.fg(Color::Indexed(240)).add_modifier(Modifier::BOLD),
            gutter: base.fg(Color::Indexed(248)),
            gutter_current: base.fg(Color::Indexed(238)),
            selection: Style::default().bg(Color::Indexed(153)).fg(Color::Indexed(235)),
            cursor: Style::default().bg(Color::Indexed(235)).fg(Color::Indexed(255)),
            toolbar: Style::default().bg(Color::Indexed(253)).fg(Color::Indexed(238)),
            toolbar_key: Style::default()
                .bg(Color::Indexed(253))
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            prompt: Style::default().bg(Color::Indexed(25)).fg(Color::White),
            h1: base
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: base.fg(Color::Indexed(28)).add_modifier(Modifier::BOLD),
            h3: base.fg(Color::Indexed(136)).add_modifier(Modifier::BOLD),
            h4: base.fg(Color::Indexed(25)).add_modifier(Modifier::BOLD),
            code: base.fg(Color::Indexed(240)),
            inline_code: base.fg(Color::Indexed(124)).add_modifier(Modifier::BOLD),
            quote: base.fg(Color::Indexed(25)).add_modifier(Modifier::ITALIC),
            link: base.fg(Color::Indexed(25)).add_modifier(Modifier::UNDERLINED),
            list_marker: base.fg(Color::Indexed(136)),
            table_border: base.fg(Color::Indexed(245)),
            hr: base.fg(Color::Indexed(245)),
            placeholder: base.fg(Color::Indexed(245)).add_modifier(Modifier::ITALIC),
        }
    }

    pub fn dark() -> Self {
        let base = Style::default().fg(Color::Indexed(252)).bg(Color::Indexed(234));
        Self {
            mode: ThemeMode::Dark,
            base,
            pane_border: base.fg(Color::Indexed(240)),
            pane_title: base.fg(Color::Indexed(250)).add_modifier(Modifier::BOLD),
            gutter: base.fg(Color::Indexed(241)),
            gutter_current: base.fg(Color::Indexed(250)),
            selection: Style::default().bg(Color::Indexed(24)).fg(Color::Indexed(255)),
            cursor: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(234)),
            toolbar: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(250)),
            toolbar_key: Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            status: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            prompt: Style::default().bg(Color::Blue).fg(Color::White),
            h1: base
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: base.fg(Color::Green).add_modifier(Modifier::BOLD),
            h3: base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
            h4: base.fg(Color::Blue).add_modifier(Modifier::BOLD),
            code: base.fg(Color::Indexed(245)),
            inline_code: base.fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: base.fg(Color::Blue).add_modifier(Modifier::ITALIC),
            link: base.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
            list_marker: base.fg(Color::Yellow),
            table_border: base.fg(Color::Indexed(240)),
            hr: base.fg(Color::Indexed(240)),
            placeholder: base.fg(Color::Indexed(243)).add_modifier(Modifier::ITALIC),
        }
    }

    pub const fn heading(&self, level: u8) -> Style {
        match level {
            1 => self.h1,
            2 => self.h2,
            3 => self.h3,
            _ => self.h4,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        let theme = Theme::dark();
        for level in 1..=6 {
            assert!(theme.heading(level).add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        assert!(
            Theme::light()
                .h1
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
    }

    #[test]
    fn test_themes_differ_in_background() {
        assert_ne!(Theme::light().base.bg, Theme::dark().base.bg);
        assert_eq!(Theme::for_mode(ThemeMode::Dark).mode, ThemeMode::Dark);
        assert_eq!(Theme::default().mode, ThemeMode::Light);
    }
}
