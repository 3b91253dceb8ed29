//! Terminal color theme.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and derived styles for the full-screen display.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub bg_dark: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            text: Color::White,
            text_dim: Color::Gray,
            text_muted: Color::DarkGray,
            border: Color::DarkGray,
            bg_dark: Color::Black,
        }
    }
}

impl Theme {
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn value_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Color for a 0-100 usage gauge: green, yellow, red as load climbs.
    pub fn usage_color(&self, percent: f32) -> Color {
        if percent >= 90.0 {
            self.danger
        } else if percent >= 70.0 {
            self.warning
        } else {
            self.success
        }
    }
}
