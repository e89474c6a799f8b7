use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::model::BreakdownRow;
use crate::tui::state::TuiState;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// The window of filtered rows that fits `height` lines, keeping the
/// selection roughly centred. Each item carries its selected flag.
pub fn get_visible_rows<'a>(
    state: &'a TuiState,
    height: usize,
) -> Vec<(&'a BreakdownRow, bool)> {
    let filtered: Vec<_> = state
        .filtered_indices
        .iter()
        .filter_map(|&i| state.rows.get(i).map(|row| (i, row)))
        .collect();

    if filtered.is_empty() || height == 0 {
        return Vec::new();
    }

    let selected_in_filtered = filtered
        .iter()
        .position(|(i, _)| *i == state.selected)
        .unwrap_or(0);

    let start = selected_in_filtered
        .saturating_sub(height / 2)
        .min(filtered.len().saturating_sub(height));
    let end = (start + height).min(filtered.len());

    filtered[start..end]
        .iter()
        .map(|&(i, row)| (row, i == state.selected))
        .collect()
}
