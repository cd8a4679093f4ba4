use crate::config::Theme;
use crate::ui::color_parser::parse_color;
use ratatui::style::Color;

/// Theme strings resolved to ratatui colors, once per frame.
#[derive(Debug, Clone)]
pub struct ThemeTokens {
    pub border_default: Color,
    pub border_search: Color,
    pub accent: Color,
    pub muted: Color,
    pub title: Color,
    pub date: Color,
    pub mood: Color,
    pub tag: Color,
    pub highlight_bg: Color,
    pub toast: Color,
}

impl ThemeTokens {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            border_default: parse_color(&theme.border_default),
            border_search: parse_color(&theme.border_search),
            accent: parse_color(&theme.accent),
            muted: parse_color(&theme.muted),
            title: parse_color(&theme.title),
            date: parse_color(&theme.date),
            mood: parse_color(&theme.mood),
            tag: parse_color(&theme.tag),
            highlight_bg: parse_color(&theme.highlight_bg),
            toast: parse_color(&theme.toast),
        }
    }
}
