//! Color themes
//!
//! Components pick colors through the active [`Theme`] instead of hard-coding
//! them, so the light palette stays readable on white terminals.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Primary text
    pub fn text(self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Light => Color::Black,
        }
    }

    /// Secondary text, borders and hints
    pub fn muted(self) -> Color {
        match self {
            Theme::Dark => Color::DarkGray,
            Theme::Light => Color::Gray,
        }
    }

    /// Titles, active tabs and selected headers
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::Blue,
        }
    }

    /// Key hints and highlights
    pub fn highlight(self) -> Color {
        match self {
            Theme::Dark => Color::Yellow,
            Theme::Light => Color::Magenta,
        }
    }

    pub fn success(self) -> Color {
        Color::Green
    }

    pub fn error(self) -> Color {
        Color::Red
    }

    /// Style of the selected row in lists
    pub fn selection(self) -> Style {
        match self {
            Theme::Dark => Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            Theme::Light => Style::default()
                .bg(Color::LightBlue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn border(self) -> Style {
        Style::default().fg(self.muted())
    }

    pub fn focused_border(self) -> Style {
        Style::default().fg(self.accent())
    }
}
