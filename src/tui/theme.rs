//! TUI theme and styles

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent color
    pub const PRIMARY: Color = Color::Cyan;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Border of the focused region
    pub fn focused_border() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Border of unfocused regions
    pub fn normal_border() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Style for regions currently in text-input mode
    pub fn editing() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Error text style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }
}
