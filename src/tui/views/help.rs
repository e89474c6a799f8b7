use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing navigation, filters and how to build the data.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "bugmap - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  j/k or ↑/↓        Move selection"),
        Line::from("  g/G               Jump to first/last"),
        Line::from("  PgUp/PgDn         Move by 10 items"),
        Line::from("  Enter, l, →       Open the selected directory"),
        Line::from("  Backspace, h, ←   Go up one level"),
        Line::from(""),
        section("Filters:"),
        Line::from("  /                 Filter entries by name"),
        Line::from("  s                 Set the since date (empty clears)"),
        Line::from("  Esc               Cancel input / close help"),
        Line::from(""),
        section("Actions:"),
        Line::from("  c                 Copy the selected path"),
        Line::from(""),
        section("Data:"),
        Line::from("  bugmap generate --pattern 'BUGS-[0-9]' -o bugs.csv"),
        Line::from("  lists the files changed by commits whose message matches"),
        Line::from("  the pattern; top-level test paths are excluded."),
        Line::from(""),
        section("General:"),
        Line::from("  ?, F1             Toggle this help"),
        Line::from("  q                 Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press '?' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
