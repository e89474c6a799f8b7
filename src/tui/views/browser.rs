use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::view::{entry_icon, intensity_bar};

use super::super::draw::{get_intensity_color, selected_style};
use super::super::layout::get_visible_rows;
use super::super::state::{LoadState, TuiState};
use super::{header_cell, truncate};

/// Render the directory browser: location header, child table and status line.
pub fn draw_browser_view(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    draw_location(f, chunks[0], state);

    if state.load_state == LoadState::Pending {
        let loading = Paragraph::new("Loading bug data...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, chunks[1]);
    } else {
        draw_entries(f, chunks[1], state);
    }

    draw_status(f, chunks[2], state);
}

fn draw_location(f: &mut Frame, area: Rect, state: &TuiState) {
    let path = if state.nav.is_root() {
        "/".to_string()
    } else {
        state.nav.base_path().to_string()
    };
    let since = state
        .nav
        .since()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "all time".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("Current path: ", Style::default().fg(Color::White)),
            Span::styled(path, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Since: ", Style::default().fg(Color::White)),
            Span::styled(since, Style::default().fg(Color::Magenta)),
            Span::raw("   "),
            Span::styled("Bug fixes here: ", Style::default().fg(Color::White)),
            Span::styled(format!("{}", state.total), Style::default().fg(Color::Green)),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .title("Bug Analysis by Directory")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(header, area);
}

fn draw_entries(f: &mut Frame, area: Rect, state: &TuiState) {
    let title = if state.search_mode {
        format!("Entries | Search: {} | Esc to cancel", state.search_query)
    } else if !state.search_query.is_empty() {
        format!(
            "Entries | Filtered: '{}' ({} results)",
            state.search_query,
            state.filtered_indices.len()
        )
    } else {
        "Entries | Enter to open, Backspace to go up, '?' for help".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if state.rows.is_empty() {
        let empty = Paragraph::new("No bug fixes found in this directory")
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Borders plus header row.
    let height = area.height.saturating_sub(3) as usize;
    let name_width = area.width.saturating_sub(36).max(12) as usize;

    let rows: Vec<Row> = get_visible_rows(state, height)
        .into_iter()
        .map(|(row, is_selected)| {
            let label = format!("{} {}", entry_icon(row.is_directory), row.name);
            let name_cell = if is_selected {
                Cell::from(truncate(&label, name_width)).style(selected_style())
            } else if row.is_directory {
                Cell::from(truncate(&label, name_width)).style(Style::default().fg(Color::White))
            } else {
                Cell::from(truncate(&label, name_width)).style(Style::default().fg(Color::Gray))
            };

            let heat = get_intensity_color(row.count, state.max_count);
            Row::new(vec![
                name_cell,
                Cell::from(format!("{:>5} bugs", row.count)).style(heat),
                Cell::from(format!("{:>5.1}%", row.share)),
                Cell::from(intensity_bar(row.count, state.max_count, 8)).style(heat),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(9),
        ],
    )
    .header(Row::new([
        header_cell("Name", Color::Yellow),
        header_cell("Count", Color::Green),
        header_cell("Share", Color::Cyan),
        header_cell("Heat", Color::Magenta),
    ]))
    .block(block);

    f.render_widget(table, area);
}

fn draw_status(f: &mut Frame, area: Rect, state: &TuiState) {
    let line = if state.since_mode {
        Line::from(vec![
            Span::styled("Since: ", Style::default().fg(Color::Yellow)),
            Span::raw(state.since_input.clone()),
            Span::styled("█", Style::default().fg(Color::Gray)),
            Span::styled(
                "  (YYYY-MM-DD or 90d, empty clears, Enter to apply)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else if let Some((message, _)) = &state.status_message {
        Line::from(Span::styled(message.clone(), Style::default().fg(Color::Cyan)))
    } else if let LoadState::Failed(err) = &state.load_state {
        Line::from(Span::styled(
            format!("Error loading file: {err}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "q quit | / filter | s since | c copy path | ? help",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
