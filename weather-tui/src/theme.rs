//! Color palette and style constants for the dashboard.

use ratatui::style::{Color, Modifier, Style};

pub const C_PRIMARY: Color = Color::Rgb(225, 225, 240);
pub const C_SECONDARY: Color = Color::Rgb(160, 160, 185);
pub const C_MUTED: Color = Color::Rgb(95, 95, 120);
pub const C_ACCENT: Color = Color::Rgb(150, 110, 230);
pub const C_PANEL_BORDER: Color = Color::Rgb(70, 70, 95);
pub const C_TILE_BORDER: Color = Color::Rgb(55, 55, 75);
pub const C_SEARCH_FG: Color = Color::Rgb(255, 200, 80);

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_bold() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_title() -> Style {
    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
}
