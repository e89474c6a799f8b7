use crossterm::event::KeyCode;

use crate::util::parse_date_arg;

use super::super::input::apply_search_filter;
use super::super::state::TuiState;

/// Handle name-filter keystrokes, applying the filter on every change.
pub(super) fn handle_search_input(code: KeyCode, state: &mut TuiState) {
    match code {
        KeyCode::Esc => {
            state.search_mode = false;
            state.search_query.clear();
            state.filtered_indices = (0..state.rows.len()).collect();
        }
        KeyCode::Enter => {
            state.search_mode = false;
            apply_search_filter(state);
        }
        KeyCode::Backspace => {
            state.search_query.pop();
            apply_search_filter(state);
        }
        KeyCode::Char(c) => {
            state.search_query.push(c);
            apply_search_filter(state);
        }
        _ => {}
    }
}

/// Handle since-date input and re-aggregate when the user submits it.
pub(super) fn handle_since_input(code: KeyCode, state: &mut TuiState) {
    match code {
        KeyCode::Esc => {
            state.since_mode = false;
            state.since_input.clear();
        }
        KeyCode::Enter => {
            state.since_mode = false;
            let trimmed = state.since_input.trim();
            let since = if trimmed.is_empty() {
                None
            } else {
                match parse_date_arg(trimmed) {
                    Ok(dt) => Some(dt),
                    Err(e) => {
                        state.set_status(e.to_string());
                        return;
                    }
                }
            };
            state.nav.set_since(since);
            let focus = state.selected_row().map(|r| r.name.clone());
            state.refresh(focus.as_deref());
        }
        KeyCode::Backspace => {
            state.since_input.pop();
        }
        KeyCode::Char(c) => {
            state.since_input.push(c);
        }
        _ => {}
    }
}
