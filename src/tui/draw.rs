use ratatui::style::{Color, Modifier, Style};

use crate::view::{heat_level, HeatLevel};

/// Chooses a style/color based on a child's count relative to the busiest sibling.
pub fn get_intensity_color(count: u32, max: u32) -> Style {
    match heat_level(count, max) {
        HeatLevel::Critical => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        HeatLevel::High => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        HeatLevel::Medium => Style::default().fg(Color::Green),
        HeatLevel::Low => Style::default().fg(Color::Cyan),
        HeatLevel::Minimal => Style::default().fg(Color::Blue),
    }
}

pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}
